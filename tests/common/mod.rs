#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use mkspk_setup::MkspkInvoker;
use tempfile::TempDir;

/// Behaviour of the stand-in for `mkspk`, called as
/// `sh <script> -setup S -input I -output O`.
pub enum FakeMkspk {
    /// Records its arguments, refuses to overwrite, writes setup + input into the kernel
    Concatenate,
    /// Exits with an error without writing anything
    Fail,
    /// Never returns in a reasonable time
    Hang,
}

impl FakeMkspk {
    fn script(&self) -> &'static str {
        match self {
            FakeMkspk::Concatenate => {
                r#"printf '%s\n' "$@" > "$(dirname "$6")/mkspk_args.txt"
if [ -e "$6" ]; then exit 3; fi
cat "$2" "$4" > "$6"
"#
            }
            FakeMkspk::Fail => "echo 'SPICE(FILEOPENFAILED)' >&2\nexit 1\n",
            FakeMkspk::Hang => "sleep 30\n",
        }
    }
}

/// Scratch directory holding a fake `mkspk`.
pub struct Workspace {
    _dir: TempDir,
    pub root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create scratch directory");
        let root = Utf8Path::from_path(dir.path())
            .expect("Scratch directory is not UTF-8")
            .to_path_buf();
        Workspace { _dir: dir, root }
    }

    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write scratch file");
        path
    }

    pub fn invoker(&self, fake: FakeMkspk) -> MkspkInvoker {
        let script = self.write("fake_mkspk.sh", fake.script());
        MkspkInvoker::new("sh").with_prefix_args([script.as_str()])
    }

    pub fn recorded_args(&self) -> Vec<String> {
        std::fs::read_to_string(self.path("mkspk_args.txt"))
            .expect("fake mkspk did not record its arguments")
            .lines()
            .map(str::to_string)
            .collect()
    }
}
