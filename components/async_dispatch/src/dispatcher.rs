//! The dispatcher handle and its drain loop.

use crate::task::{Task, TaskQueue};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to one FIFO deferred-callback queue.
///
/// The contract is exactly: a scheduled callback runs strictly after the
/// current synchronous execution unwinds, and callbacks run in the order
/// they were scheduled. Nothing blocks, nothing is cancelled.
///
/// The queue lock is released before a task runs, so tasks may schedule
/// further tasks (and routinely do).
///
/// # Examples
///
/// ```
/// use async_dispatch::{Dispatcher, Task};
/// use std::sync::{Arc, Mutex};
///
/// let dispatcher = Dispatcher::new();
/// let order = Arc::new(Mutex::new(vec![]));
///
/// let o = order.clone();
/// dispatcher.schedule(Task::new(move || o.lock().unwrap().push("later")));
/// order.lock().unwrap().push("now");
///
/// dispatcher.run_until_idle();
/// assert_eq!(*order.lock().unwrap(), vec!["now", "later"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Dispatcher {
    queue: Arc<Mutex<TaskQueue>>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty queue.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(TaskQueue::new())),
        }
    }

    /// Appends a task to the queue.
    pub fn schedule(&self, task: Task) {
        self.queue.lock().enqueue(task);
    }

    /// Returns the number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns true if no task is waiting.
    pub fn is_idle(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Runs the oldest waiting task, if any. Returns whether one ran.
    pub fn run_one(&self) -> bool {
        let task = self.queue.lock().dequeue();
        match task {
            Some(task) => {
                task.run();
                true
            }
            None => false,
        }
    }

    /// Drains the queue until it is empty, including tasks scheduled while
    /// draining. Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_one() {
            ran += 1;
        }
        ran
    }
}
