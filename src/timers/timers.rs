use super::{Duration, Instant};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: HashMap<&'static str, InnerTimer>,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        self.elapsed += self.start.unwrap().elapsed();
        self.start = None;
    }

    // pause an apparently running timer, retaining its
    // accumulated total.  resume undoes this by refreshing
    // the start time.  Used in pairs by notimeit!
    fn suspend(&mut self) {
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
            suspend_all(&mut self.subtimers);
        }
    }

    fn resume(&mut self) {
        if self.start.is_some() {
            self.start = Some(Instant::now());
            resume_all(&mut self.subtimers);
        }
    }
}

fn suspend_all(timers: &mut HashMap<&'static str, InnerTimer>) {
    for t in timers.values_mut() {
        t.suspend();
    }
}

fn resume_all(timers: &mut HashMap<&'static str, InnerTimer>) {
    for t in timers.values_mut() {
        t.resume();
    }
}

fn print_all(timers: &HashMap<&'static str, InnerTimer>, depth: usize) {
    for (key, val) in timers.iter() {
        println!("{: <1$}{2} : {3:?}", "", 4 * depth, key, val.elapsed);
        print_all(&val.subtimers, depth + 1);
    }
}

/// A stack of named cumulative timers.  Starting a timer while another
/// is running registers it as a child of the running one, so nested
/// `timeit!` blocks produce a tree of elapsed times.
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: HashMap<&'static str, InnerTimer>,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;

        let mut active = self.subtimers.get_mut(first).unwrap();
        for key in rest {
            active = active.subtimers.get_mut(key).unwrap();
        }
        Some(active)
    }

    /// zero out the named root timer and drop its children
    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.entry(key).or_default().reset();
    }

    /// start the named timer as a child of whichever timer is
    /// currently running, or at the root if none is
    pub fn start_as_current(&mut self, key: &'static str) {
        let subtimers = match self.mut_active_timer() {
            Some(active) => &mut active.subtimers,
            None => &mut self.subtimers,
        };
        subtimers.entry(key).or_default().start();

        self.stack.push(key);
    }

    /// stop the current timer.  There should always be one
    /// running when this function is reached.
    pub fn stop_current(&mut self) {
        self.mut_active_timer().unwrap().stop();
        self.stack.pop();
    }

    /// suspend every running timer.  Used by `notimeit!`
    pub fn suspend(&mut self) {
        suspend_all(&mut self.subtimers);
    }

    /// resume every suspended timer.  Used by `notimeit!`
    pub fn resume(&mut self) {
        resume_all(&mut self.subtimers);
    }

    /// total accumulated time over all root timers, including the
    /// in-flight interval of any timer that is still running
    pub fn total_time(&self) -> Duration {
        self.subtimers.values().fold(Duration::ZERO, |acc, t| {
            let in_flight = t.start.map_or(Duration::ZERO, |s| s.elapsed());
            acc + t.elapsed + in_flight
        })
    }

    /// debug printout of the timer tree
    pub fn print(&self) {
        print_all(&self.subtimers, 0);
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;

#[test]
fn test_timer_nesting() {
    let mut timers = Timers::default();

    timeit! {timers => "outer"; {
        timeit!{timers => "inner"; {
            std::thread::sleep(Duration::from_millis(1));
        }}
    }}

    assert!(timers.total_time() >= Duration::from_millis(1));
    assert!(timers.stack.is_empty());
}
