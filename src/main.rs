/*!
 * parfill - Demonstration Driver
 *
 * Runs the eleven classic cases: every scheduling policy with the
 * append mutex held, then three policies without it, printing the
 * buffer and per-worker counts after each fill.
 */

use parfill::{FillError, ParallelFiller, Policy, RuntimeSchedule};

fn run_case(number: usize, title: &str, exclusive: bool, policy: Policy) -> Result<(), FillError> {
    println!("Case {}: {}", number, title);

    let mut filler = ParallelFiller::new(exclusive);
    if policy == Policy::Runtime {
        filler = filler.with_runtime_schedule(RuntimeSchedule::new(Policy::Static));
    }
    filler.fill(policy)?;

    let readout = filler.readout()?;
    println!("{}", readout.contents);
    let counts: Vec<String> = readout
        .counts
        .iter()
        .map(|(label, count)| format!("{}={}", label, count))
        .collect();
    println!("{}", counts.join(" "));
    if readout.dropped_writes > 0 {
        println!("dropped writes: {}", readout.dropped_writes);
    }
    Ok(())
}

fn main() -> Result<(), FillError> {
    env_logger::init();

    println!("Each worker should add its char to the buffer n times (n=20)");
    println!("Correct results should total exactly workers*iterations chars");

    run_case(1, "Schedule static", true, Policy::Static)?;
    run_case(2, "Schedule static, with chunk = 5", true, Policy::StaticChunk)?;
    run_case(3, "Schedule dynamic", true, Policy::Dynamic)?;
    run_case(4, "Schedule dynamic, with chunk = 5", true, Policy::DynamicChunk)?;
    run_case(5, "Schedule guided", true, Policy::Guided)?;
    run_case(6, "Schedule guided, with chunk = 5", true, Policy::GuidedChunk)?;
    run_case(7, "Schedule runtime", true, Policy::Runtime)?;
    run_case(8, "Schedule auto", true, Policy::Auto)?;
    run_case(9, "Schedule runtime without mutex", false, Policy::Runtime)?;
    run_case(10, "Schedule dynamic without mutex", false, Policy::Dynamic)?;
    run_case(
        11,
        "Schedule dynamic, with chunk = 5 and without mutex",
        false,
        Policy::DynamicChunk,
    )?;

    Ok(())
}
