use std::io::Write;

use estudio_vis::refresh::CountdownDisplay;
use estudio_vis::refresh::IntervalTicker;
use estudio_vis::refresh::RefreshTimer;
use estudio_vis::refresh::Reload;
use estudio_vis::theme::Theme;

use crate::cli::PathExt;
use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::fetch::client::IndexClient;
use crate::fetch::fetch_dashboard;
use crate::view::current_theme;
use crate::view::write_dashboard;

/// Prints the countdown on a single terminal line.
struct TerminalCountdown<W> {
    out: W,
}

impl<W: Write> TerminalCountdown<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CountdownDisplay for TerminalCountdown<W> {
    fn show(&mut self, seconds: u32) {
        let shown = write!(self.out, "\rnext refresh in {seconds:>4} s")
            .and_then(|()| self.out.flush());

        if let Err(error) = shown {
            tracing::debug!("could not print the countdown: {error}");
        }
    }
}

#[derive(Default)]
struct ReloadRequest {
    count: u64,
}

impl Reload for ReloadRequest {
    fn reload(&mut self) {
        self.count += 1;
        eprintln!();
        tracing::info!("refreshing the dashboard (#{})", self.count);
    }
}

pub(crate) fn watch(args: WatchArgs, system_theme: Option<Theme>) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;
    let store_path = args.theme_store.or_default_store()?;
    let client = IndexClient::new()?;

    let mut ticker = IntervalTicker;
    let mut display = TerminalCountdown::new(std::io::stderr());
    let mut reload = ReloadRequest::default();

    loop {
        let data = fetch_dashboard(&client);
        let theme = current_theme(&store_path, system_theme)?;
        write_dashboard(&output_path, Some(&data), theme, args.seconds)?;

        RefreshTimer::new(args.seconds).start(&mut ticker, Some(&mut display), &mut reload);
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn terminal_countdown_rewrites_a_single_line() {
        let mut display = TerminalCountdown::new(Vec::new());

        display.show(300);
        display.show(9);

        let printed = String::from_utf8_lossy(&display.out).into_owned();
        assert_eq!(printed, "\rnext refresh in  300 s\rnext refresh in    9 s");
    }

    #[test]
    fn terminal_countdown_tolerates_a_closed_output() {
        let mut display = TerminalCountdown::new(ClosedOutput);

        display.show(1);
        display.show(0);
    }
}
