mod algorithm;
mod entropy;
mod hyperparams;
mod iter;
mod rules;

pub use algorithm::*;
pub use entropy::*;
pub use hyperparams::*;
pub use iter::*;
pub use rules::*;
