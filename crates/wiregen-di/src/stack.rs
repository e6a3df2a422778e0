//! Per-thread tracking of types currently under construction

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::{DiError, DiResult};

#[derive(Default)]
pub(crate) struct ActiveStack {
    stacks: Mutex<HashMap<ThreadId, Vec<String>>>,
}

impl ActiveStack {
    /// Marks `name` as being created on this thread until the guard drops
    pub(crate) fn enter(&self, name: &str) -> DiResult<StackGuard<'_>> {
        let thread = thread::current().id();
        let mut stacks = self.stacks.lock();
        let stack = stacks.entry(thread).or_default();

        if stack.iter().any(|active| active == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(DiError::CircularDependency { chain });
        }

        stack.push(name.to_string());
        Ok(StackGuard {
            owner: self,
            thread,
        })
    }
}

pub(crate) struct StackGuard<'a> {
    owner: &'a ActiveStack,
    thread: ThreadId,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        let mut stacks = self.owner.stacks.lock();
        if let Some(stack) = stacks.get_mut(&self.thread) {
            stack.pop();
            if stack.is_empty() {
                stacks.remove(&self.thread);
            }
        }
    }
}
