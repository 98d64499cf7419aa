pub mod activation;

pub use activation::{log_sigmoid, sigmoid, sigmoid_grad, softmax};
