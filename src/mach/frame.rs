use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Pushed by a call or loop start, no line executed yet.
    Fresh,
    Running,
    /// Pushed back below a callee; resumes at `index`.
    Suspended,
}

/// ## One in-progress block execution

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    block: Rc<str>,
    looping: bool,
    index: usize,
    state: FrameState,
}

impl Frame {
    pub fn new(block: &str, looping: bool) -> Frame {
        Frame {
            block: block.into(),
            looping,
            index: 0,
            state: FrameState::Fresh,
        }
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }

    pub fn run(&mut self) {
        self.state = FrameState::Running;
    }

    pub fn suspend(&mut self) {
        self.state = FrameState::Suspended;
    }

    /// A fresh frame for the same block, used to repeat a loop.
    pub fn restart(&self) -> Frame {
        Frame {
            block: self.block.clone(),
            looping: self.looping,
            index: 0,
            state: FrameState::Fresh,
        }
    }
}
