// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module reads and writes the instance files. An instance file holds
//! one single line of whitespace separated distances. Generated instances
//! come with a verification file (`<instance>.verify`) recording the map they
//! were drawn from:
//!
//! ```text
//! Cuts: 3
//! Sites: 0 12 23 35 60
//! Distances: 12 60 23 11 ...
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use regex::Regex;

use crate::common::Coord;
use crate::instance::Error;

/// Parses one line of whitespace separated distances. Negative distances are
/// rejected.
pub fn parse_distances(line: &str) -> Result<Vec<Coord>, Error> {
    let mut out = vec![];
    for token in line.split_whitespace() {
        let value = token.parse::<Coord>()?;
        if value < 0 {
            return Err(Error::OutOfRange(value));
        }
        out.push(value);
    }
    Ok(out)
}

fn join(values: &[Coord]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

/// Reads the distances of an instance. Only the first line of the file is
/// considered.
pub fn read_instance<P: AsRef<Path>>(fname: P) -> Result<Vec<Coord>, Error> {
    let f = File::open(fname)?;
    let f = BufReader::new(f);

    let line = f.lines().next().ok_or(Error::Empty)??;
    let distances = parse_distances(&line)?;
    if distances.is_empty() {
        return Err(Error::Empty);
    }
    Ok(distances)
}

/// Writes the distances of an instance on one single line.
pub fn write_instance<P: AsRef<Path>>(fname: P, distances: &[Coord]) -> Result<(), Error> {
    let mut f = File::create(fname)?;
    writeln!(f, "{}", join(distances))?;
    Ok(())
}

/// The content of a verification file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFile {
    pub cuts     : usize,
    pub sites    : Vec<Coord>,
    pub distances: Vec<Coord>,
}
impl VerifyFile {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let cuts_decl  = Regex::new(r"^Cuts:\s*(?P<cuts>\d+)\s*$").map_err(|e| Error::Format(e.to_string()))?;
        let sites_decl = Regex::new(r"^Sites:(?P<sites>.*)$").map_err(|e| Error::Format(e.to_string()))?;
        let dist_decl  = Regex::new(r"^Distances:(?P<dist>.*)$").map_err(|e| Error::Format(e.to_string()))?;

        let mut cuts      = None;
        let mut sites     = None;
        let mut distances = None;
        for line in text.lines() {
            let line = line.trim();
            if let Some(caps) = cuts_decl.captures(line) {
                cuts = Some(caps["cuts"].parse::<usize>()?);
            } else if let Some(caps) = sites_decl.captures(line) {
                sites = Some(parse_distances(&caps["sites"])?);
            } else if let Some(caps) = dist_decl.captures(line) {
                distances = Some(parse_distances(&caps["dist"])?);
            }
        }

        Ok(VerifyFile {
            cuts     : cuts.ok_or_else(|| Error::Format("missing 'Cuts:' line".to_string()))?,
            sites    : sites.ok_or_else(|| Error::Format("missing 'Sites:' line".to_string()))?,
            distances: distances.ok_or_else(|| Error::Format("missing 'Distances:' line".to_string()))?,
        })
    }
    pub fn read<P: AsRef<Path>>(fname: P) -> Result<Self, Error> {
        Self::parse(&fs::read_to_string(fname)?)
    }
    pub fn write<P: AsRef<Path>>(&self, fname: P) -> Result<(), Error> {
        let mut f = File::create(fname)?;
        writeln!(f, "Cuts: {}", self.cuts)?;
        writeln!(f, "Sites: {}", join(&self.sites))?;
        writeln!(f, "Distances: {}", join(&self.distances))?;
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_io {
    use crate::instance::io::{parse_distances, VerifyFile};
    use crate::instance::Error;

    #[test]
    fn distances_are_whitespace_separated() {
        assert_eq!(parse_distances("2 3\t5  ").unwrap(), vec![2, 3, 5]);
        assert!(parse_distances("").unwrap().is_empty());
    }
    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_distances("2 x 5"), Err(Error::ParseInt(_))));
        assert!(matches!(parse_distances("2 3.5"), Err(Error::ParseInt(_))));
    }
    #[test]
    fn negative_distances_are_rejected() {
        assert!(matches!(parse_distances("2 -3"), Err(Error::OutOfRange(-3))));
    }
    #[test]
    fn verify_files_are_parsed() {
        let text = "Cuts: 1\nSites: 0 2 5\nDistances: 5 2 3\n";
        let file = VerifyFile::parse(text).unwrap();
        assert_eq!(1, file.cuts);
        assert_eq!(file.sites, vec![0, 2, 5]);
        assert_eq!(file.distances, vec![5, 2, 3]);
    }
    #[test]
    fn verify_files_need_all_three_lines() {
        assert!(matches!(VerifyFile::parse("Cuts: 1\nSites: 0 2 5"), Err(Error::Format(_))));
    }
}
