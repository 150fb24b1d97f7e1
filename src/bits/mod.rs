pub mod reader;
pub mod sequence;
pub mod writer;

pub use reader::BitReader;
pub use sequence::BitSequence;
pub use writer::BitWriter;
