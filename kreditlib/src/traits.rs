//! Унифицированные трэйты чтения/записи этапов на основе std::io::{BufRead, Write}.

use crate::error::Result;
use std::io::{BufRead, Write};

pub trait ReadStage {
    type Row;
    fn read<R: BufRead>(r: R) -> Result<Vec<Self::Row>>;
}

pub trait WriteStage {
    type Row;
    fn write<W: Write>(w: W, rows: &[Self::Row]) -> Result<()>;
}
