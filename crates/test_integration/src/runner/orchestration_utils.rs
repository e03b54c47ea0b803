use color_eyre::Result;
use colored::Colorize;
use std::future::Future;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! run_test {
    ($call:expr) => {
        $crate::runner::orchestration_utils::run_test_impl(stringify!($call), $call)
    };
}

/// Runs every listed test against the shared context, keeps going past failed results,
/// prints a summary and evaluates to the names of the tests that failed.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:path),* $(,)? ]) => {{
        let suite_start = ::std::time::Instant::now();
        let mut total_tests = 0_usize;
        let mut failed: Vec<&'static str> = Vec::new();
        println!();

        $(
            total_tests += 1;
            if $crate::run_test!($test_fn($context)).await.is_err() {
                failed.push(stringify!($test_fn));
            }
        )*

        $crate::runner::orchestration_utils::print_summary(
            total_tests,
            &failed,
            suite_start,
        );
        failed
    }};
}

/// Runs one test, framed with its name, outcome and duration.
pub async fn run_test_impl<Fut>(raw_name: &str, test: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    let name_no_args = raw_name.split('(').next().unwrap_or(raw_name);
    let pretty_name = name_no_args
        .rsplit("::")
        .next()
        .unwrap_or(name_no_args)
        .trim();

    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!(
        "{} {}",
        " RUNNING ".on_cyan().black().bold(),
        pretty_name.cyan().bold()
    );

    let start_time = Instant::now();
    let result = test.await;
    let elapsed = start_time.elapsed();

    match &result {
        Ok(()) => println!(
            "{} {} ({elapsed:.2?})",
            " PASSED ".on_green().black().bold(),
            pretty_name.green(),
        ),
        Err(e) => {
            println!(
                "{} {} ({elapsed:.2?})",
                " FAILED ".on_red().black().bold(),
                pretty_name.red(),
            );
            println!("\n{e:?}");
        }
    }

    result
}

pub fn print_summary(total_tests: usize, failed: &[&str], suite_start: Instant) {
    let passed = total_tests - failed.len();
    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!(
        "{} {passed}/{total_tests} tests passed in {:.2?}.",
        " SUMMARY ".on_purple().black().bold(),
        suite_start.elapsed()
    );
    for name in failed {
        println!("  {} {}", "✗".red().bold(), name.red());
    }
    println!("{}", "─".repeat(60).truecolor(80, 80, 80));
    println!();
}

pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "warn,api=info,common_services=info,test_integration=info,sqlx=warn".into()
    });

    // Another test binary may already have installed these.
    let _ = fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
    let _ = color_eyre::install();
}
