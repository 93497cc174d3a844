use std::{ffi::OsStr, path::PathBuf};

use crate::builtin::Registry;

/// Command names known to the line editor, builtins and `PATH` executables.
pub type Completion = trie_rs::Trie<u8>;

fn program_names() -> Vec<String> {
    let mut v = vec![];
    let Some(paths) = std::env::var_os("PATH") else {
        log::debug!("PATH is not set, completing builtins only");
        return v;
    };

    let process_file = |file: PathBuf| {
        let name = file.file_name().and_then(OsStr::to_str).map(str::to_owned);
        if name.is_none() {
            log::debug!("cannot complete non UTF-8 file name {}", file.display());
        }
        name
    };

    for path in std::env::split_paths(&paths).filter(|e| e.is_dir()) {
        // unreadable PATH entries are skipped rather than failing the editor
        let Ok(entries) = std::fs::read_dir(&path) else {
            log::debug!("skipping unreadable PATH entry {}", path.display());
            continue;
        };
        for file in entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|e| e.is_file())
        {
            v.extend(process_file(file));
        }
    }

    v
}

pub fn generate_completion(registry: &Registry) -> Completion {
    let mut builder = trie_rs::TrieBuilder::new();

    for name in registry.names() {
        builder.push(name);
    }

    for name in program_names() {
        builder.push(name);
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtins_are_completed() {
        let completion = generate_completion(&Registry::new());

        let found: Vec<String> = completion.predictive_search("hel").collect();
        assert!(found.iter().any(|f| f == "help"), "{found:?}");

        let exact: Vec<String> = completion.predictive_search("exit").collect();
        assert!(exact.iter().any(|f| f == "exit"));
    }

    #[test]
    fn unknown_prefix_has_no_matches() {
        let completion = generate_completion(&Registry::new());
        let found: Vec<String> = completion
            .predictive_search("not-a-real-program-xyz")
            .collect();
        assert_eq!(found.len(), 0);
    }
}
