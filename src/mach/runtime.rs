use super::{Cells, Frame, Opcode, Operation, Program, Stack, Update, Val};
use crate::error;
use crate::lang::{Error, Line, ENTRY_BLOCK};
use log::{debug, trace};
use rand::seq::IteratorRandom;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::rc::Rc;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

/// ## Events returned by `Runtime::execute`

#[derive(Debug)]
pub enum Event {
    /// Text for the console.
    Print(String),
    /// Waiting for `Runtime::enter`.
    Input,
    ClearScreen,
    /// Fatal. The runtime is stopped.
    Error(Error),
    /// Cycle budget used up; call `execute` again.
    Running,
    Stopped,
}

/// ## Block scheduler and opcode dispatch
///
/// Frames live on an explicit stack; calls never recurse on the
/// host stack. A call pushes the callee, the caller is pushed back
/// on top of it and the two are swapped so the callee runs first.

pub struct Runtime {
    program: Program,
    cells: Cells,
    stack: Stack<Frame>,
    frame: Option<Frame>,
    at: Option<(Rc<[Line]>, usize)>,
    skip_next: bool,
    returned: bool,
    dispatched: bool,
    awaiting: Option<String>,
    entered: Option<String>,
    stopped: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Program::default())
    }
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            program,
            cells: Cells::new(),
            stack: Stack::new("FRAME STACK"),
            frame: None,
            at: None,
            skip_next: false,
            returned: false,
            dispatched: false,
            awaiting: None,
            entered: None,
            stopped: true,
        }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Frames waiting on the stack, bottom first.
    pub fn frames(&self) -> std::slice::Iter<'_, Frame> {
        self.stack.iter()
    }

    /// Begin at `entry`, or at the `main` block when none is given.
    /// Cells from a previous run are discarded.
    pub fn start(&mut self, entry: Option<&str>) -> Result<()> {
        let name = entry.unwrap_or(ENTRY_BLOCK);
        if !self.program.contains(name) {
            if name == ENTRY_BLOCK {
                return Err(error!(EntryBlockNotFound));
            }
            return Err(error!(BlockNotFound; name));
        }
        self.stop();
        self.cells.clear();
        self.stack.push(Frame::new(name, false))?;
        self.stopped = false;
        debug!("start at block {}", name);
        Ok(())
    }

    /// Supply a line of text to a waiting INPUT.
    pub fn enter(&mut self, s: &str) {
        if self.awaiting.is_some() {
            self.entered = Some(s.trim_end_matches(&['\r', '\n'][..]).to_string());
        }
    }

    pub fn interrupt(&mut self) {
        if !self.stopped {
            debug!("interrupted");
            self.stop();
        }
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        if self.stopped {
            return Event::Stopped;
        }
        if let Some(name) = self.awaiting.take() {
            let text = match self.entered.take() {
                Some(text) => text,
                None => {
                    self.awaiting = Some(name);
                    return Event::Input;
                }
            };
            if let Err(error) = self.cells.assign(&name, &text, Update::Write) {
                return self.fail(error);
            }
        }
        for _ in 0..cycles {
            match self.step() {
                Ok(None) => {}
                Ok(Some(event)) => return event,
                Err(error) => return self.fail(error),
            }
        }
        Event::Running
    }

    fn stop(&mut self) {
        self.stack.clear();
        self.frame = None;
        self.at = None;
        self.skip_next = false;
        self.returned = false;
        self.dispatched = false;
        self.awaiting = None;
        self.entered = None;
        self.stopped = true;
    }

    fn fail(&mut self, error: Error) -> Event {
        let error = match &self.at {
            Some((block, index)) => {
                let line = &block[*index];
                error
                    .in_line_number(line.number())
                    .in_command(&line.to_string())
            }
            None => error,
        };
        debug!("{}", error);
        self.stop();
        Event::Error(error)
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let mut frame = match self.frame.take() {
            Some(frame) => frame,
            None => match self.stack.pop() {
                Some(mut frame) => {
                    trace!("run {} at {} ({:?})", frame.block(), frame.index(), frame.state());
                    frame.run();
                    frame
                }
                None => {
                    debug!("frame stack empty");
                    self.stop();
                    return Ok(Some(Event::Stopped));
                }
            },
        };
        let block = match self.program.block(frame.block()) {
            Some(block) => block,
            None => return Err(error!(BlockNotFound; frame.block())),
        };
        if self.returned || self.dispatched || frame.index() >= block.len() {
            self.leave(frame, block.len())?;
            return Ok(None);
        }
        let index = frame.index();
        frame.advance();
        self.frame = Some(frame);
        self.at = Some((Rc::clone(&block), index));
        if self.skip_next {
            self.skip_next = false;
            trace!("skip line {}", block[index].number());
            return Ok(None);
        }
        self.exec(&block[index])
    }

    /// The frame stops stepping: decide whether it restarts,
    /// waits below a callee or is dropped.
    fn leave(&mut self, mut frame: Frame, len: usize) -> Result<()> {
        let returned = std::mem::replace(&mut self.returned, false);
        let dispatched = std::mem::replace(&mut self.dispatched, false);
        if returned {
            debug!("return from {}", frame.block());
            return Ok(());
        }
        let resume = if frame.index() < len {
            frame.suspend();
            Some(frame)
        } else if frame.is_looping() {
            Some(frame.restart())
        } else {
            None
        };
        if let Some(resume) = resume {
            trace!("push {} at {} ({:?})", resume.block(), resume.index(), resume.state());
            self.stack.push(resume)?;
            if dispatched {
                self.stack.swap_top();
            }
        }
        Ok(())
    }

    fn exec(&mut self, line: &Line) -> Result<Option<Event>> {
        let command = line.command();
        let opcode = match Opcode::from_code(command) {
            Some(opcode) => opcode,
            None => return Err(error!(UndefinedCommand; command)),
        };
        if line.tokens().len() <= opcode.arity() {
            return Err(error!(InvalidSyntax));
        }
        let arg = |index: usize| line.argument(index).unwrap_or_default();
        trace!("{} {:?}", opcode, &line.tokens()[1..]);

        use Opcode::*;
        match opcode {
            Exit => {
                debug!("exit");
                self.stop();
                return Ok(Some(Event::Stopped));
            }
            Print => {
                let text = self.cells.get(arg(1))?.val().to_string();
                return Ok(Some(Event::Print(text.replace("\\n", "\n"))));
            }
            Input => {
                self.cells.get(arg(1))?;
                self.awaiting = Some(arg(1).to_string());
                return Ok(Some(Event::Input));
            }
            ClearConsole => return Ok(Some(Event::ClearScreen)),
            Sleep => self.sleep(arg(1))?,
            AssignValue => self.cells.assign(arg(1), arg(2), Update::Write)?,
            AddConstant => self.cells.assign(arg(1), arg(2), Update::Accumulate)?,
            Increment => self.step_by(arg(1), "1")?,
            Decrement => self.step_by(arg(1), "-1")?,
            Swap => {
                let (lhs, rhs) = self.same_type_pair(arg(1), arg(2))?;
                self.cells.get_mut(arg(1))?.store(rhs)?;
                self.cells.get_mut(arg(2))?.store(lhs)?;
            }
            CopyCell => {
                let (_, rhs) = self.same_type_pair(arg(1), arg(2))?;
                self.cells.get_mut(arg(1))?.store(rhs)?;
            }
            StringToInt | IntToString => {
                let text = self.cells.get(arg(2))?.val().to_string();
                self.cells.assign(arg(1), &text, Update::Write)?;
            }
            CreateCell => {
                self.cells.create(arg(1), arg(2))?;
            }
            Sum => self.binary(arg(1), arg(2), Operation::sum)?,
            Subtract => self.binary(arg(1), arg(2), Operation::subtract)?,
            Multiply => self.binary(arg(1), arg(2), Operation::multiply)?,
            Divide => self.binary(arg(1), arg(2), Operation::divide)?,
            Modulo => self.binary(arg(1), arg(2), Operation::modulo)?,
            Max => self.binary(arg(1), arg(2), Operation::max)?,
            Min => self.binary(arg(1), arg(2), Operation::min)?,
            Gcd => self.binary(arg(1), arg(2), Operation::gcd)?,
            Lcm => self.binary(arg(1), arg(2), Operation::lcm)?,
            And => self.binary(arg(1), arg(2), Operation::and)?,
            Or => self.binary(arg(1), arg(2), Operation::or)?,
            Xor => self.binary(arg(1), arg(2), Operation::xor)?,
            Not => self.unary(arg(1), Operation::not)?,
            Invert => self.unary(arg(1), Operation::invert)?,
            Equal | NotEqual | Greater | Less | GreaterEqual | LessEqual => {
                let (lhs, rhs) = self.pair(arg(1), arg(2))?;
                if !condition(opcode, &lhs, &rhs)? {
                    self.skip_next = true;
                }
            }
            Uppercase => match self.cells.get_mut(arg(1))?.text_mut() {
                Some(s) => *s = s.to_uppercase(),
                None => return Err(error!(TypeIsNotString)),
            },
            Lowercase => match self.cells.get_mut(arg(1))?.text_mut() {
                Some(s) => *s = s.to_lowercase(),
                None => return Err(error!(TypeIsNotString)),
            },
            Length => {
                let len = match self.cells.get(arg(2))?.val() {
                    Val::String(s) => s.chars().count(),
                    _ => return Err(error!(TypeIsNotString)),
                };
                self.cells.get_mut(arg(1))?.store(Val::Integer(len as i64))?;
            }
            DeleteChar => self.delete_char(arg(1), arg(2))?,
            RandomChar => self.random_char(arg(1), arg(2))?,
            CallBlock => self.dispatch(arg(1), false)?,
            StartLoop => self.dispatch(arg(1), true)?,
            Return => self.returned = true,
        }
        Ok(None)
    }

    fn pair(&self, lhs: &str, rhs: &str) -> Result<(Val, Val)> {
        let l = self.cells.get(lhs)?.val().clone();
        let r = self.cells.get(rhs)?.val().clone();
        Ok((l, r))
    }

    fn same_type_pair(&self, lhs: &str, rhs: &str) -> Result<(Val, Val)> {
        let (l, r) = self.pair(lhs, rhs)?;
        if l.cell_type() != r.cell_type() {
            return Err(error!(TypeMismatch));
        }
        Ok((l, r))
    }

    fn binary(&mut self, lhs: &str, rhs: &str, op: fn(Val, Val) -> Result<Val>) -> Result<()> {
        let (l, r) = self.pair(lhs, rhs)?;
        let val = op(l, r)?;
        self.cells.get_mut(lhs)?.store(val)
    }

    fn unary(&mut self, name: &str, op: fn(Val) -> Result<Val>) -> Result<()> {
        let val = op(self.cells.get(name)?.val().clone())?;
        self.cells.get_mut(name)?.store(val)
    }

    fn step_by(&mut self, name: &str, delta: &str) -> Result<()> {
        let cell = self.cells.get_mut(name)?;
        if cell.val().is_string() {
            return Err(error!(StringNotAllowed));
        }
        cell.assign(delta, Update::Accumulate)
    }

    fn dispatch(&mut self, name: &str, looping: bool) -> Result<()> {
        let target = self.cells.get(name)?.val().to_string();
        if !self.program.contains(&target) {
            return Err(error!(BlockNotFound; target));
        }
        debug!("{} block {}", if looping { "loop" } else { "call" }, target);
        self.stack.push(Frame::new(&target, looping))?;
        self.dispatched = true;
        Ok(())
    }

    fn sleep(&self, name: &str) -> Result<()> {
        let cell = self.cells.get(name)?;
        let secs = match cell.val() {
            Val::Integer(n) => *n as f64,
            Val::Float(n) => *n,
            Val::String(_) => return Err(error!(StringNotAllowed)),
        };
        if !(secs.is_finite() && secs >= 0.0 && secs < u64::MAX as f64) {
            return Err(error!(InvalidValueForType; cell.cell_type()));
        }
        std::thread::sleep(Duration::from_secs_f64(secs));
        Ok(())
    }

    /// Remove the character at a zero-based index.
    /// Indexes outside the text leave it unchanged.
    fn delete_char(&mut self, text: &str, index: &str) -> Result<()> {
        let index = match (self.cells.get(text)?.val(), self.cells.get(index)?.val()) {
            (Val::String(_), Val::Integer(i)) => *i,
            _ => return Err(error!(RequiresStringAndInteger)),
        };
        if let Some(s) = self.cells.get_mut(text)?.text_mut() {
            if let Ok(i) = usize::try_from(index) {
                if let Some((at, _)) = s.char_indices().nth(i) {
                    s.remove(at);
                }
            }
        }
        Ok(())
    }

    fn random_char(&mut self, dest: &str, source: &str) -> Result<()> {
        let picked = match (self.cells.get(dest)?.val(), self.cells.get(source)?.val()) {
            (Val::String(_), Val::String(s)) => s
                .chars()
                .choose(&mut rand::thread_rng())
                .map(String::from)
                .unwrap_or_default(),
            _ => return Err(error!(TypeIsNotString)),
        };
        self.cells.get_mut(dest)?.store(Val::String(picked))
    }
}

fn condition(opcode: Opcode, lhs: &Val, rhs: &Val) -> Result<bool> {
    let ordering = match opcode {
        Opcode::Equal => return Ok(Operation::equal(lhs, rhs)),
        Opcode::NotEqual => return Ok(!Operation::equal(lhs, rhs)),
        _ => Operation::compare(lhs, rhs)?,
    };
    Ok(match opcode {
        Opcode::Greater => ordering == Some(Ordering::Greater),
        Opcode::Less => ordering == Some(Ordering::Less),
        Opcode::GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        Opcode::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        _ => false,
    })
}
