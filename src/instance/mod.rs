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

//! This module groups everything related to the instances of the partial
//! digest problem that live outside of the solvers: the random generation of
//! restriction maps, the special instance families used to stress the
//! solvers, and the text files holding the instances.

mod generator;
mod io;
mod store;

pub use generator::*;
pub use io::*;
pub use store::*;

use std::num::ParseIntError;

use crate::common::Coord;

/// This enumeration simply groups the kind of errors that might occur when
/// manipulating instances. There can be io errors (file unavailable ?), format
/// errors (the file is not an instance), parse int errors (the parser expected
/// an integer but got something else), or instances which can not possibly
/// be generated by any map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The parser expected to read something that was an integer but got some garbage
    #[error("parse int {0}")]
    ParseInt(#[from] ParseIntError),
    /// The file was not properly formatted.
    #[error("ill formed file: {0}")]
    Format(String),
    /// The instance holds no distance at all
    #[error("empty instance")]
    Empty,
    /// The number of distances is not C(n, 2) for any n
    #[error("{0} distances can not be generated by any map")]
    NotTriangular(usize),
    /// A distance lies outside of the admissible range
    #[error("distance {0} is out of range")]
    OutOfRange(Coord),
    /// There is no such instance in the store
    #[error("unknown instance {0}")]
    UnknownInstance(String),
    /// A map needs at least a minimum number of cuts
    #[error("{0} cuts is too few")]
    TooFewCuts(usize),
}
