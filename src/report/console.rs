use std::io::{self, Write};

use log::warn;

use super::{ReportSink, ReportSnapshot};
use crate::sensor::SensorError;

pub const BAR_WIDTH: u32 = 40;

const RULE: &str = "=========================================";
const THIN_RULE: &str = "-----------------------------------------";

/// Fixed-width text dashboard on the serial console (or any other writer).
pub struct ConsoleDashboard<W> {
    out: W,
}

impl ConsoleDashboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleDashboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_ready(&mut self) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "  System active, monitoring light...")?;
        writeln!(self.out, "{RULE}")?;
        self.out.flush()
    }

    fn write_snapshot(&mut self, s: &ReportSnapshot) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "{RULE}")?;
        writeln!(out, "           LUX CONTROL SYSTEM")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Light:         {:7.1} lux", s.reading)?;
        writeln!(out, "Servo angle:   {:7} deg", s.position)?;
        writeln!(out, "Step interval: {:7} ms/step", s.interval_ms())?;
        writeln!(out, "{THIN_RULE}")?;
        writeln!(
            out,
            "Light: [{}] {}%",
            bar(s.light_fill(BAR_WIDTH), '='),
            s.light_fill(100)
        )?;
        writeln!(
            out,
            "Speed: [{}] {}%",
            bar(s.speed_fill(BAR_WIDTH), '>'),
            s.speed_fill(100)
        )?;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "More light = clockwise | Less light = counter-clockwise"
        )?;
        out.flush()
    }

    fn write_sensor_error(&mut self, error: &SensorError) -> io::Result<()> {
        writeln!(self.out, "!! {error}, retrying")?;
        self.out.flush()
    }
}

fn bar(filled: u32, mark: char) -> String {
    let filled = filled.min(BAR_WIDTH) as usize;
    let mut bar = mark.to_string().repeat(filled);
    bar.push_str(&" ".repeat(BAR_WIDTH as usize - filled));
    bar
}

impl<W: Write> ReportSink for ConsoleDashboard<W> {
    fn ready(&mut self) {
        if let Err(e) = self.write_ready() {
            warn!("console write failed: {e}");
        }
    }

    fn snapshot(&mut self, snapshot: &ReportSnapshot) {
        if let Err(e) = self.write_snapshot(snapshot) {
            warn!("console write failed: {e}");
        }
    }

    fn sensor_error(&mut self, error: &SensorError) {
        if let Err(e) = self.write_sensor_error(error) {
            warn!("console write failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::snapshot;

    fn render(f: impl FnOnce(&mut ConsoleDashboard<Vec<u8>>)) -> String {
        let mut console = ConsoleDashboard::new(Vec::new());
        f(&mut console);
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn dashboard_layout() {
        let text = render(|c| c.snapshot(&snapshot(312.5, 56, 144)));
        let expected = "\
=========================================
           LUX CONTROL SYSTEM
=========================================
Light:           312.5 lux
Servo angle:        56 deg
Step interval:     144 ms/step
-----------------------------------------
Light: [============                            ] 31%
Speed: [>>>>>>>>>>>>                            ] 31%
=========================================
More light = clockwise | Less light = counter-clockwise
";
        assert_eq!(text, expected);
    }

    #[test]
    fn bars_are_always_forty_wide() {
        for (lux, interval) in [(0.0, 200), (1000.0, 20), (70_000.0, 20), (-5.0, 200)] {
            let text = render(|c| c.snapshot(&snapshot(lux, 0, interval)));
            for line in text.lines().filter(|l| l.contains('[')) {
                let open = line.find('[').unwrap();
                let close = line.find(']').unwrap();
                assert_eq!(close - open - 1, BAR_WIDTH as usize, "{line}");
            }
        }
    }

    #[test]
    fn saturated_reading_shows_full_bars() {
        let text = render(|c| c.snapshot(&snapshot(1500.0, 180, 20)));
        assert!(text.contains(&format!("Light: [{}] 100%", "=".repeat(40))));
        assert!(text.contains(&format!("Speed: [{}] 100%", ">".repeat(40))));
        assert!(text.contains("Light:          1500.0 lux"));
    }

    #[test]
    fn sensor_error_line() {
        let text = render(|c| c.sensor_error(&SensorError::Bus("I2C timeout".into())));
        assert_eq!(text, "!! light sensor bus error: I2C timeout, retrying\n");
    }

    #[test]
    fn ready_banner() {
        let text = render(|c| c.ready());
        assert!(text.contains("System active"));
    }
}
