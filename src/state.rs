use std::{ops::Deref, sync::Arc};

use crate::error::{ErrorVerbosity, ErrorVerbosityProvider};

pub mod person_directory;

use person_directory::PersonDirectory;

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, persons: Arc<dyn PersonDirectory>) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                persons,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    persons: Arc<dyn PersonDirectory>,
}

impl ApiStateInner {
    /// Returns the read-only lookup of existing persons.
    pub fn persons(&self) -> &dyn PersonDirectory {
        self.persons.as_ref()
    }
}

impl ErrorVerbosityProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
