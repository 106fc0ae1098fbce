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

//! This module provides the `InstanceStore`: a directory of instance files
//! (`*.txt`), each of which comes with its verification file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::Rng;

use crate::common::Coord;
use crate::instance::generator::{RestrictionMap, SortOrder};
use crate::instance::io::{read_instance, write_instance, VerifyFile};
use crate::instance::Error;

/// The fewest cuts a generated map may have
pub const MIN_CUTS: usize = 3;
/// The extension of the instance files
pub const INSTANCE_EXT: &str = "txt";
/// The suffix appended to an instance file name to get its verification file
pub const VERIFY_EXT: &str = "verify";

/// A directory holding instances. Every name handed to the store is resolved
/// relative to its directory, unless it is an absolute path or it explicitly
/// starts from the current (`./`) or parent (`../`) directory.
///
/// # Example
/// ```
/// # use pdp::instance::InstanceStore;
/// let store = InstanceStore::new("output/instances");
/// assert_eq!(store.path_of("a.txt"), std::path::Path::new("output/instances/a.txt"));
/// assert_eq!(store.path_of("./a.txt"), std::path::Path::new("./a.txt"));
/// ```
#[derive(Debug, Clone)]
pub struct InstanceStore {
    dir: PathBuf
}
impl InstanceStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        InstanceStore { dir: dir.into() }
    }
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    /// Resolves the path of the given instance
    pub fn path_of(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() || name.starts_with("./") || name.starts_with("../") {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
    /// Resolves the path of the verification file of the given instance
    pub fn verify_path_of(&self, name: &str) -> PathBuf {
        self.path_of(&format!("{}.{}", name, VERIFY_EXT))
    }

    /// Draws a random map with `cuts` cuts and saves its distances (in the
    /// given order) as instance `name`, along with its verification file.
    pub fn generate<R: Rng + ?Sized>(&self, cuts: usize, name: &str, order: SortOrder, rng: &mut R) -> Result<RestrictionMap, Error> {
        if cuts < MIN_CUTS {
            return Err(Error::TooFewCuts(cuts));
        }
        fs::create_dir_all(&self.dir)?;

        let map = RestrictionMap::generate(cuts, rng);
        let mut distances = map.distances();
        order.apply(&mut distances, rng);

        write_instance(self.path_of(name), &distances)?;
        let verify = VerifyFile { cuts, sites: map.sites().to_vec(), distances };
        verify.write(self.verify_path_of(name))?;

        debug!("generated {} ({} cuts, length {})", name, cuts, map.total_length());
        Ok(map)
    }
    /// Replaces the content of the store with one instance per number of cuts
    /// in `MIN_CUTS..=max_cuts` (named `sequential_<cuts>.txt`). Returns the
    /// names of the generated instances.
    pub fn generate_range<R: Rng + ?Sized>(&self, max_cuts: usize, order: SortOrder, rng: &mut R) -> Result<Vec<String>, Error> {
        if max_cuts < MIN_CUTS {
            return Err(Error::TooFewCuts(max_cuts));
        }
        self.clear()?;
        let mut names = vec![];
        for cuts in MIN_CUTS..=max_cuts {
            let name = format!("sequential_{}.{}", cuts, INSTANCE_EXT);
            self.generate(cuts, &name, order, rng)?;
            names.push(name);
        }
        info!("generated {} instances in {}", names.len(), self.dir.display());
        Ok(names)
    }
    /// Replaces the content of the store with `count` random instances (named
    /// `random_<i>.txt`, i starting at 1) whose number of cuts cycles from
    /// `MIN_CUTS` to `MIN_CUTS + 4`. Returns the names of the generated
    /// instances.
    pub fn generate_random<R: Rng + ?Sized>(&self, count: usize, order: SortOrder, rng: &mut R) -> Result<Vec<String>, Error> {
        self.clear()?;
        let mut names = vec![];
        for i in 0..count {
            let cuts = MIN_CUTS + i % 5;
            let name = format!("random_{}.{}", i + 1, INSTANCE_EXT);
            self.generate(cuts, &name, order, rng)?;
            names.push(name);
        }
        info!("generated {} instances in {}", names.len(), self.dir.display());
        Ok(names)
    }
    /// Removes all the instance and verification files of the store
    pub fn clear(&self) -> Result<(), Error> {
        if !self.dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let ext  = path.extension().and_then(|e| e.to_str());
            if path.is_file() && (ext == Some(INSTANCE_EXT) || ext == Some(VERIFY_EXT)) {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Loads the distances of the given instance
    pub fn load(&self, name: &str) -> Result<Vec<Coord>, Error> {
        let path = self.path_of(name);
        if !path.is_file() {
            return Err(Error::UnknownInstance(name.to_string()));
        }
        read_instance(path)
    }
    /// Loads the verification file of the given instance
    pub fn load_verify(&self, name: &str) -> Result<VerifyFile, Error> {
        let path = self.verify_path_of(name);
        if !path.is_file() {
            return Err(Error::UnknownInstance(format!("{}.{}", name, VERIFY_EXT)));
        }
        VerifyFile::read(path)
    }
    /// Returns true iff the distances of the instance are exactly those of
    /// the map recorded in its verification file.
    pub fn verify(&self, name: &str) -> Result<bool, Error> {
        let distances = self.load(name)?;
        let verify    = self.load_verify(name)?;
        Ok(RestrictionMap::from_sites(verify.sites)
            .map(|map| map.verify_distances(&distances))
            .unwrap_or(false))
    }
    /// The names of all the instances of the store, sorted
    pub fn list(&self) -> Result<Vec<String>, Error> {
        if !self.dir.is_dir() {
            return Ok(vec![]);
        }
        let mut names = vec![];
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(INSTANCE_EXT) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_store {
    use std::path::Path;

    use crate::instance::store::InstanceStore;

    #[test]
    fn relative_names_are_resolved_in_the_store() {
        let store = InstanceStore::new("somewhere");
        assert_eq!(store.path_of("x.txt"), Path::new("somewhere/x.txt"));
        assert_eq!(store.verify_path_of("x.txt"), Path::new("somewhere/x.txt.verify"));
    }
    #[test]
    fn explicit_paths_are_kept_as_is() {
        let store = InstanceStore::new("somewhere");
        assert_eq!(store.path_of("./x.txt"), Path::new("./x.txt"));
        assert_eq!(store.path_of("../x.txt"), Path::new("../x.txt"));
        assert_eq!(store.path_of("/tmp/x.txt"), Path::new("/tmp/x.txt"));
    }
    #[test]
    fn a_missing_directory_lists_nothing() {
        let store = InstanceStore::new("this/directory/does/not/exist");
        assert!(store.list().unwrap().is_empty());
    }
}
