//! Handler methods of [`super::EventLoop`], one `impl` block per concern.
mod input;
mod rendering;
mod session;
