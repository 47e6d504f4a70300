//! Frame evaluation entry points, single-frame and batched.

pub mod frame;
