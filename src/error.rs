use crate::graph::GraphError;
use crate::io::ParseError;
use crate::traits::HeapError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Heap(#[from] HeapError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("malformed input: {0}")]
    Parse(#[from] ParseError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
