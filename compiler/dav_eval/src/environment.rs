//! Variable storage for one run.
//!
//! A global store lives for the whole run. Each active user-function call
//! pushes a local frame; only the innermost frame is visible, so a callee
//! never sees its caller's locals.

use rustc_hash::FxHashMap;

use crate::modules::Module;
use crate::value::Value;

/// Where an assignment inside a call writes a name that is not yet local.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AssignPolicy {
    /// Local if the name is already bound locally, otherwise global.
    #[default]
    GlobalFallback,
    /// Always local inside a call.
    LocalFirst,
}

type Scope = FxHashMap<String, Value>;

/// Global store, call-local frames and imported modules.
#[derive(Debug, Default)]
pub struct Environment {
    globals: Scope,
    frames: Vec<Scope>,
    /// Imported modules keyed by the lowercased name used in `import`.
    modules: FxHashMap<String, Module>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Scope::default());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Look up a variable, local first.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.frames
            .last()
            .and_then(|frame| frame.get(name))
            .or_else(|| self.globals.get(name))
            .cloned()
    }

    /// Look up a global variable, ignoring any active frame.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    /// Bind `name` in the current scope: the active frame, or globals at top level.
    pub fn declare(&mut self, name: &str, value: Value) {
        self.current_mut().insert(name.to_string(), value);
    }

    /// Write `name` according to `policy`.
    pub fn assign(&mut self, name: &str, value: Value, policy: AssignPolicy) {
        match (self.frames.last_mut(), policy) {
            (Some(frame), AssignPolicy::LocalFirst) => {
                frame.insert(name.to_string(), value);
            }
            _ => self.store(name, value),
        }
    }

    /// Write `name` back to the scope that owns it, or globals if unbound locally.
    pub fn store(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.frames.last_mut().and_then(|frame| frame.get_mut(name)) {
            *slot = value;
        } else {
            self.globals.insert(name.to_string(), value);
        }
    }

    /// Bind a module under the name it was imported by.
    pub fn import(&mut self, alias: &str, module: Module) {
        self.modules.insert(alias.to_lowercase(), module);
    }

    pub fn module(&self, alias: &str) -> Option<Module> {
        self.modules.get(&alias.to_lowercase()).copied()
    }

    /// Global variable names, sorted.
    pub fn global_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.globals.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn current_mut(&mut self) -> &mut Scope {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.globals,
        }
    }
}
