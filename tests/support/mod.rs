//! Shared test utilities.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use camino::Utf8PathBuf;
use rstest_bdd::Slot;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slots
/// behave unexpectedly.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Creates a temporary directory for state and template files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Path of `file_name` inside `dir`.
///
/// # Errors
///
/// Returns an error when the temporary directory path is not UTF-8.
pub fn utf8_path(dir: &TempDir, file_name: &str) -> Result<Utf8PathBuf, io::Error> {
    Utf8PathBuf::from_path_buf(dir.path().join(file_name))
        .map_err(|path| io::Error::other(format!("non UTF-8 path: {}", path.display())))
}

/// PEM private key matching `tests/fixtures/app_public_key.pem`.
pub fn private_key_path() -> Utf8PathBuf {
    Utf8PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/app_private_key.pem"
    ))
}
