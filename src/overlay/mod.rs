pub(crate) mod contrast;
pub(crate) mod metrics;
pub(crate) mod plan;
pub(crate) mod position;
pub(crate) mod sample;
