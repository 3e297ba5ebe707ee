use got::Repository;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Writer whose output stays readable after it is handed to a repository
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    /// Everything written since the last call
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8(bytes).expect("output is not UTF-8")
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn init_repository(dir: &Path) -> (Repository, CapturedOutput) {
    colored::control::set_override(false);
    let output = CapturedOutput::default();
    let repository =
        Repository::init(dir, Box::new(output.clone())).expect("Failed to init repository");
    output.take();

    (repository, output)
}

pub fn open_repository(dir: &Path) -> (Repository, CapturedOutput) {
    colored::control::set_override(false);
    let output = CapturedOutput::default();
    let repository =
        Repository::open(dir, Box::new(output.clone())).expect("Failed to open repository");

    (repository, output)
}

pub fn write(dir: &Path, path: &str, content: &str) {
    crate::common::file::write_file(crate::common::file::FileSpec::new(
        dir.join(path),
        content.to_string(),
    ));
}

pub fn paths(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| path.to_string()).collect()
}
