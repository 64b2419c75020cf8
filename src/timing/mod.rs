//! Time sources and the cooperative schedulers driven by the host's frame loop.

pub(crate) mod animation;
pub(crate) mod clock;
pub(crate) mod delay;
