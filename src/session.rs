//! In-memory session registry keyed by typed parameters.
//!
//! Parameter names are unique within a [`ParamRegistry`] owned by the caller, so independent
//! subsystems (and independent tests) never contend over a process-wide name table.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

/// Error registering or using a session parameter.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum SessionError {
    /// The parameter name is empty.
    #[error("parameter name is empty")]
    EmptyName,
    /// The parameter name is already registered.
    #[error("parameter name {0:?} is already in use")]
    DuplicateName(String),
}

/// Hands out session parameters with names guaranteed unique within this registry.
#[derive(Debug, Default)]
pub struct ParamRegistry {
    names: Mutex<HashSet<Arc<str>>>,
}

impl ParamRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new typed parameter under the given name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::session::ParamRegistry;
    ///
    /// let registry = ParamRegistry::new();
    /// let id = registry.param::<u32>("id")?;
    /// assert_eq!(id.name(), "id");
    /// assert!(registry.param::<u32>("id").is_err()); // name already taken
    /// # Ok::<(), uuid1::session::SessionError>(())
    /// ```
    pub fn param<T>(&self, name: &str) -> Result<SessionParam<T>, SessionError> {
        if name.is_empty() {
            tracing::error!("rejecting empty session parameter name");
            return Err(SessionError::EmptyName);
        }
        let name: Arc<str> = Arc::from(name);
        let mut names = self.names.lock().expect("session registry lock poisoned");
        if !names.insert(Arc::clone(&name)) {
            tracing::error!(name = &*name, "session parameter name already in use");
            return Err(SessionError::DuplicateName(name.to_string()));
        }
        Ok(SessionParam {
            name,
            _value: PhantomData,
        })
    }
}

/// A typed session parameter key.
///
/// Two parameters are the same key exactly when their names are equal; the registry that
/// created them keeps the names from colliding.
pub struct SessionParam<T> {
    name: Arc<str>,
    _value: PhantomData<fn() -> T>,
}

impl<T> SessionParam<T> {
    /// Returns the name of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for SessionParam<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SessionParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionParam").field(&self.name).finish()
    }
}

/// A bag of typed parameter values representing one logical session.
#[derive(Default)]
pub struct Session {
    params: Mutex<HashMap<Arc<str>, Box<dyn Any + Send + Sync>>>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under the given parameter, replacing any previous value.
    pub fn set<T: Send + Sync + 'static>(&self, param: &SessionParam<T>, value: T) {
        self.params
            .lock()
            .expect("session lock poisoned")
            .insert(Arc::clone(&param.name), Box::new(value));
    }

    /// Returns a copy of the value stored under the given parameter, if any.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, param: &SessionParam<T>) -> Option<T> {
        self.params
            .lock()
            .expect("session lock poisoned")
            .get(&param.name)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Returns the names of the parameters currently set.
    pub fn param_names(&self) -> Vec<String> {
        self.params
            .lock()
            .expect("session lock poisoned")
            .keys()
            .map(|name| name.to_string())
            .collect()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("params", &self.param_names())
            .finish()
    }
}

/// A registry of live sessions looked up by a keying parameter value.
///
/// Structural mutation (adding and removing sessions) happens under a single mutex, as does
/// lookup; the sessions themselves are handed out behind [`Arc`] so callers keep using them
/// after the lock is released.
///
/// # Examples
///
/// ```rust
/// use uuid1::session::{ParamRegistry, SessionManager};
///
/// let registry = ParamRegistry::new();
/// let id = registry.param::<u32>("id")?;
///
/// let manager = SessionManager::new();
/// let session = manager.get_or_create(&id, 42);
/// session.set(&registry.param::<String>("operator")?, "alice".to_owned());
///
/// assert_eq!(manager.len(), 1);
/// assert!(manager.find(&id, &42).is_some());
/// # Ok::<(), uuid1::session::SessionError>(())
/// ```
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: Mutex<Vec<Arc<Session>>>,
}

impl SessionManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session whose keying parameter holds the given value, creating and
    /// registering a new one if none matches.
    pub fn get_or_create<V>(&self, param: &SessionParam<V>, value: V) -> Arc<Session>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let mut sessions = self.sessions.lock().expect("session manager lock poisoned");
        if let Some(found) = Self::position(&sessions, param, &value) {
            return Arc::clone(&sessions[found]);
        }
        let session = Arc::new(Session::new());
        session.set(param, value);
        sessions.push(Arc::clone(&session));
        session
    }

    /// Returns the session whose keying parameter holds the given value, if any.
    pub fn find<V>(&self, param: &SessionParam<V>, value: &V) -> Option<Arc<Session>>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let sessions = self.sessions.lock().expect("session manager lock poisoned");
        Self::position(&sessions, param, value).map(|found| Arc::clone(&sessions[found]))
    }

    /// Removes and returns the session whose keying parameter holds the given value, if any.
    pub fn remove<V>(&self, param: &SessionParam<V>, value: &V) -> Option<Arc<Session>>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let mut sessions = self.sessions.lock().expect("session manager lock poisoned");
        Self::position(&sessions, param, value).map(|found| sessions.remove(found))
    }

    /// Drops every registered session.
    pub fn clear(&self) {
        self.sessions
            .lock()
            .expect("session manager lock poisoned")
            .clear();
    }

    /// Returns the number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session manager lock poisoned")
            .len()
    }

    /// Returns whether no session is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of every registered session.
    pub fn to_vec(&self) -> Vec<Arc<Session>> {
        self.sessions
            .lock()
            .expect("session manager lock poisoned")
            .clone()
    }

    fn position<V>(
        sessions: &[Arc<Session>],
        param: &SessionParam<V>,
        value: &V,
    ) -> Option<usize>
    where
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        sessions
            .iter()
            .position(|session| session.get(param).as_ref() == Some(value))
    }
}
