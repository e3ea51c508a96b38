use std::{
    fs::File,
    io::BufReader,
    path::Path,
    time::{Duration, Instant},
};

use xz2::read::XzDecoder;

use crate::{
    dimacs::{read_dimacs, Formula},
    err,
};

pub fn load_dimacs(path: &Path) -> Result<Formula, err::Cli> {
    let file = match File::open(path) {
        Err(_) => return Err(err::Cli::Open(path.to_path_buf())),
        Ok(f) => f,
    };

    let formula = match &path.extension() {
        Some(extension) if *extension == "xz" => read_dimacs(BufReader::new(XzDecoder::new(&file))),
        _ => read_dimacs(BufReader::new(&file)),
    };

    formula.map_err(|e| err::Cli::Parse(path.to_path_buf(), e))
}

/// A point in time after which solves should stop, if any.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Option<Duration>) -> Self {
        Deadline {
            start: Instant::now(),
            limit,
        }
    }

    pub fn passed(&self) -> bool {
        match self.limit {
            Some(limit) => self.start.elapsed() >= limit,
            None => false,
        }
    }
}
