//! Opening discovered files for reading, one at a time.

use std::fs::File;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RunError;
use crate::output::{self, OutputContext};
use crate::walker::DiscoveredFile;

/// Shared flag raised by SIGINT / Ctrl-C
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    /// Create a flag and register it as the process Ctrl-C handler.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Self::default();
        let flag = interrupt.clone();
        ctrlc::set_handler(move || flag.trigger())?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once the flag has been raised
    pub fn check(&self) -> Result<(), RunError> {
        if self.is_triggered() {
            Err(RunError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// A discovered file with a read-only handle
#[derive(Debug)]
pub struct OpenedFile {
    pub file: DiscoveredFile,
    pub handle: File,
}

/// Lazily opens each discovered file in order.
///
/// Files that cannot be opened are reported and skipped. Once the interrupt
/// flag is raised the iterator yields `Err(Interrupted)` and then stops.
pub struct OpenBatch<'a> {
    files: std::vec::IntoIter<DiscoveredFile>,
    interrupt: &'a Interrupt,
    ctx: &'a OutputContext,
    done: bool,
}

impl<'a> OpenBatch<'a> {
    pub fn new(files: Vec<DiscoveredFile>, interrupt: &'a Interrupt, ctx: &'a OutputContext) -> Self {
        Self {
            files: files.into_iter(),
            interrupt,
            ctx,
            done: false,
        }
    }
}

impl Iterator for OpenBatch<'_> {
    type Item = Result<OpenedFile, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Err(e) = self.interrupt.check() {
                self.done = true;
                return Some(Err(e));
            }

            let file = self.files.next()?;
            match File::open(&file.path) {
                Ok(handle) => return Some(Ok(OpenedFile { file, handle })),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    output::print_warning(
                        &format!("File `{}` is not available!", file.path.display()),
                        self.ctx,
                    );
                }
                Err(e) => {
                    output::print_warning(
                        &format!(
                            "Something went wrong while trying to open `{}`: {e}",
                            file.path.display()
                        ),
                        self.ctx,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn discovered(dir: &TempDir, name: &str) -> DiscoveredFile {
        DiscoveredFile {
            path: dir.path().join(name),
            ext: "lua".to_string(),
        }
    }

    #[test]
    fn test_vanished_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.lua"), "x\n").unwrap();
        fs::write(dir.path().join("c.lua"), "x\n").unwrap();
        let files = vec![
            discovered(&dir, "a.lua"),
            discovered(&dir, "gone.lua"),
            discovered(&dir, "c.lua"),
        ];

        let interrupt = Interrupt::default();
        let ctx = OutputContext::silent();
        let opened: Vec<OpenedFile> = OpenBatch::new(files, &interrupt, &ctx)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(opened.len(), 2);
        assert!(opened[1].file.path.ends_with("c.lua"));
    }

    #[test]
    fn test_interrupt_aborts_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.lua"), "x\n").unwrap();
        fs::write(dir.path().join("b.lua"), "x\n").unwrap();
        let files = vec![discovered(&dir, "a.lua"), discovered(&dir, "b.lua")];

        let interrupt = Interrupt::default();
        let ctx = OutputContext::silent();
        let mut batch = OpenBatch::new(files, &interrupt, &ctx);

        assert!(batch.next().unwrap().is_ok());
        interrupt.trigger();
        assert!(matches!(batch.next(), Some(Err(RunError::Interrupted))));
        assert!(batch.next().is_none());
    }

    #[test]
    fn test_interrupt_clone_shares_flag() {
        let interrupt = Interrupt::default();
        let handler_side = interrupt.clone();
        assert!(interrupt.check().is_ok());
        handler_side.trigger();
        assert!(interrupt.is_triggered());
    }
}
