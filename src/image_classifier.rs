pub mod factory;
#[cfg(test)]
pub mod impl_fake;
pub mod impl_timeout;
pub mod impl_tract_onnx;
pub mod impl_tract_onnx_per_call;
pub mod interface;
pub mod models;
pub mod tract;
