use c42::mach::{Event, Program, Runtime};

#[allow(dead_code)]
pub fn run(source: &str) -> String {
    let mut runtime = Runtime::new(Program::parse(source));
    match runtime.start(None) {
        Ok(()) => exec(&mut runtime),
        Err(error) => format!("{}\n", error),
    }
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Collects console output. INPUT answers come from `answers`;
/// when they run out the output so far is returned.
#[allow(dead_code)]
pub fn exec_with_input(runtime: &mut Runtime, answers: &[&str]) -> String {
    let mut answers = answers.iter();
    let mut s = String::new();
    loop {
        s.push_str(&exec(runtime));
        if !s.ends_with('?') {
            return s;
        }
        match answers.next() {
            Some(answer) => {
                s.pop();
                runtime.enter(answer);
            }
            None => return s,
        }
    }
}

pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Error(error) => {
                s.push_str(&format!("{}\n", error));
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(ps);
            }
            Event::ClearScreen => {
                s.push_str("<CLS>");
            }
            Event::Input => {
                s.push('?');
                break;
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}
