//! Position evaluation.
//!
//! Scores a board position from a given power's perspective, considering
//! supply-center counts, unit positioning, and strategic factors. The
//! heuristic evaluator is always available; the neural evaluator is an
//! optional ONNX-backed refinement used when a model is configured.

pub(crate) mod heuristic;
pub mod neural;

pub use heuristic::{evaluate, evaluate_all};
pub use neural::NeuralEvaluator;
