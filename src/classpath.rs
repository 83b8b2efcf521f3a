//! Resolution of the jar files needed to launch ktlint.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::constants::JAR_MANIFEST_PATH;
use crate::error::{Error, Result};
use crate::ktlint::Coordinates;

/// Platform the hook is generated for; decides the classpath separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    pub fn classpath_separator(self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::Other => ':',
        }
    }
}

/// Joins classpath entries with the separator `java` expects on `platform`.
pub fn join_classpath(entries: &[PathBuf], platform: Platform) -> String {
    entries
        .iter()
        .map(|entry| entry.display().to_string())
        .collect::<Vec<_>>()
        .join(&platform.classpath_separator().to_string())
}

/// Turns ktlint coordinates into the jar files making up its classpath.
pub trait ClasspathResolver {
    fn resolve(&self, coordinates: &Coordinates) -> Result<Vec<PathBuf>>;
}

/// Classpath given explicitly by the user; the jars are only checked for existence.
#[derive(Debug, Clone, Default)]
pub struct ExplicitClasspath {
    jars: Vec<PathBuf>,
}

impl ExplicitClasspath {
    pub fn new(jars: Vec<PathBuf>) -> Self {
        Self { jars }
    }
}

impl ClasspathResolver for ExplicitClasspath {
    fn resolve(&self, coordinates: &Coordinates) -> Result<Vec<PathBuf>> {
        if self.jars.is_empty() {
            return Err(Error::ResolutionError(format!(
                "Could not resolve the dependency \"{coordinates}\".\n\
                 No classpath was configured; download ktlint {} and pass its jar file(s) with --classpath",
                coordinates.version
            )));
        }

        if let Some(missing) = self.jars.iter().find(|jar| !jar.is_file()) {
            return Err(Error::ResolutionError(format!(
                "Could not resolve the dependency \"{coordinates}\".\n\
                 Classpath entry {} does not exist or is not a file",
                missing.display()
            )));
        }

        let jars = self
            .jars
            .iter()
            .map(|jar| jar.canonicalize().map_err(Error::IoError))
            .collect::<Result<Vec<_>>>()?;

        debug!("Resolved {coordinates} to {} jar file(s)", jars.len());
        Ok(jars)
    }
}

/// Reads the main class of a classpath from the manifests of its jars.
///
/// Exactly one jar has to declare a `Main-Class`; jars without a manifest
/// (or without the attribute) are skipped.
///
/// # Errors
/// * `Error::ResolutionError` if a file is not a jar, or if no jar or more
///   than one jar declares a main class
pub fn read_main_class(jars: &[PathBuf]) -> Result<String> {
    let mut found: Option<(String, &PathBuf)> = None;

    for jar in jars {
        let Some(main_class) = jar_main_class(jar)? else {
            continue;
        };

        if let Some((first_main_class, first_jar)) = &found {
            return Err(Error::ResolutionError(format!(
                "Classpath contains multiple main classes: {first_main_class} ({}) and {main_class} ({})",
                first_jar.display(),
                jar.display()
            )));
        }

        debug!("Main class {main_class} declared by {}", jar.display());
        found = Some((main_class, jar));
    }

    found.map(|(main_class, _)| main_class).ok_or_else(|| {
        Error::ResolutionError(
            "Classpath contains no main class; pass it explicitly with --main-class".to_string(),
        )
    })
}

fn jar_main_class(jar: &Path) -> Result<Option<String>> {
    let file = File::open(jar).map_err(Error::IoError)?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        Error::ResolutionError(format!("{} is not a jar file: {e}", jar.display()))
    })?;

    let mut manifest = match archive.by_name(JAR_MANIFEST_PATH) {
        Ok(manifest) => manifest,
        Err(ZipError::FileNotFound) => {
            debug!("{} has no manifest", jar.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(Error::ResolutionError(format!(
                "Could not read the manifest of {}: {e}",
                jar.display()
            )))
        }
    };

    let mut content = String::new();
    manifest.read_to_string(&mut content).map_err(Error::IoError)?;

    Ok(manifest_main_class(&content))
}

/// Extracts `Main-Class` from the main section of a jar manifest.
///
/// Attribute names are case-insensitive and long values may be continued on
/// lines starting with a single space.
pub fn manifest_main_class(manifest: &str) -> Option<String> {
    let mut attributes: Vec<String> = Vec::new();

    for line in manifest.lines() {
        // end of the main section
        if line.is_empty() {
            break;
        }

        match line.strip_prefix(' ') {
            Some(continuation) => {
                if let Some(last) = attributes.last_mut() {
                    last.push_str(continuation);
                }
            }
            None => attributes.push(line.to_string()),
        }
    }

    attributes
        .iter()
        .find_map(|attribute| {
            let (name, value) = attribute.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("Main-Class")
                .then(|| value.trim().to_string())
        })
        .filter(|main_class| !main_class.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_classpath() {
        let entries = vec![PathBuf::from("/a/ktlint.jar"), PathBuf::from("/b/deps.jar")];
        assert_eq!(
            join_classpath(&entries, Platform::Other),
            "/a/ktlint.jar:/b/deps.jar"
        );
        assert_eq!(
            join_classpath(&entries, Platform::Windows),
            "/a/ktlint.jar;/b/deps.jar"
        );
        assert_eq!(join_classpath(&[], Platform::Other), "");
    }

    #[test]
    fn test_manifest_main_class() {
        let manifest = "Manifest-Version: 1.0\r\nMain-Class: com.pinterest.ktlint.Main\r\n\r\n";
        assert_eq!(
            manifest_main_class(manifest).as_deref(),
            Some("com.pinterest.ktlint.Main")
        );
    }

    #[test]
    fn test_manifest_main_class_continuation_and_case() {
        let manifest = "Manifest-Version: 1.0\nmain-class: com.example.very.long\n .package.Main\n";
        assert_eq!(
            manifest_main_class(manifest).as_deref(),
            Some("com.example.very.long.package.Main")
        );
    }

    #[test]
    fn test_manifest_main_class_only_in_main_section() {
        assert_eq!(manifest_main_class("Manifest-Version: 1.0\n"), None);
        assert_eq!(
            manifest_main_class("Manifest-Version: 1.0\n\nName: a/b\nMain-Class: x.Y\n"),
            None
        );
        assert_eq!(manifest_main_class("Main-Class: \n"), None);
    }
}
