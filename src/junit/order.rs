//! Deterministic ordering of the files in a suite.

use std::collections::HashMap;

use crate::suite::File;

/// Returns the files ordered by ascending byte-wise file name.
///
/// The map's own iteration order is never observed: keys are collected and
/// sorted before any file is looked up.
pub fn sorted_files(files: &HashMap<String, File>) -> Vec<&File> {
    let mut names: Vec<&String> = files.keys().collect();
    names.sort();
    names.into_iter().map(|name| &files[name]).collect()
}
