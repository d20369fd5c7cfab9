//! 128x64 monochrome OLED dashboard.

use std::fmt::Debug;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use log::warn;

use super::{ReportSink, ReportSnapshot};
use crate::sensor::SensorError;

/// Full width of both bar widgets in pixels.
pub const BAR_WIDTH: u32 = 120;
const BAR_HEIGHT: u32 = 5;
pub const BAR_LEFT: i32 = 4;
pub const LIGHT_BAR_TOP: i32 = 50;
pub const SPEED_BAR_TOP: i32 = 58;

/// A frame buffer that can be pushed to the glass.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    fn present(&mut self) -> anyhow::Result<()>;
}

pub struct OledDashboard<P> {
    panel: P,
}

impl<P> OledDashboard<P>
where
    P: Panel,
    P::Error: Debug,
{
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    #[cfg(test)]
    fn panel(&self) -> &P {
        &self.panel
    }

    fn draw_ready(&mut self) -> Result<(), P::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        self.panel.clear(BinaryColor::Off)?;
        Text::new("System active", Point::new(0, 25), style).draw(&mut self.panel)?;
        Text::new("Monitoring...", Point::new(0, 40), style).draw(&mut self.panel)?;
        Ok(())
    }

    fn draw_snapshot(&mut self, s: &ReportSnapshot) -> Result<(), P::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let fill = PrimitiveStyle::with_fill(BinaryColor::On);

        self.panel.clear(BinaryColor::Off)?;
        Text::new("Lux control", Point::new(0, 10), style).draw(&mut self.panel)?;
        Line::new(Point::new(0, 12), Point::new(127, 12))
            .into_styled(stroke)
            .draw(&mut self.panel)?;

        let lines = [
            format!("LUX: {:.1}", s.reading),
            format!("Angle: {}", s.position),
            format!("Speed: {}ms", s.interval_ms()),
        ];
        for (text, y) in lines.iter().zip([23, 34, 45]) {
            Text::new(text, Point::new(0, y), style).draw(&mut self.panel)?;
        }

        Rectangle::new(
            Point::new(BAR_LEFT, LIGHT_BAR_TOP),
            Size::new(s.light_fill(BAR_WIDTH), BAR_HEIGHT),
        )
        .into_styled(fill)
        .draw(&mut self.panel)?;

        let speed_bar = Point::new(BAR_LEFT, SPEED_BAR_TOP);
        Rectangle::new(speed_bar, Size::new(BAR_WIDTH, BAR_HEIGHT))
            .into_styled(stroke)
            .draw(&mut self.panel)?;
        Rectangle::new(speed_bar, Size::new(s.speed_fill(BAR_WIDTH), BAR_HEIGHT))
            .into_styled(fill)
            .draw(&mut self.panel)?;
        Ok(())
    }

    fn draw_sensor_error(&mut self, error: &SensorError) -> Result<(), P::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        self.panel.clear(BinaryColor::Off)?;
        Text::new("Lux control", Point::new(0, 10), style).draw(&mut self.panel)?;
        Text::new("Sensor error", Point::new(0, 30), style).draw(&mut self.panel)?;
        let detail = match error {
            SensorError::Bus(_) => "no reply on I2C",
            SensorError::Invalid(_) => "bad reading",
        };
        Text::new(detail, Point::new(0, 42), style).draw(&mut self.panel)?;
        Ok(())
    }

    fn show(&mut self, drawn: Result<(), P::Error>) {
        if let Err(e) = drawn {
            warn!("oled draw failed: {e:?}");
            return;
        }
        if let Err(e) = self.panel.present() {
            warn!("oled flush failed: {e:?}");
        }
    }
}

impl<P> ReportSink for OledDashboard<P>
where
    P: Panel,
    P::Error: Debug,
{
    fn ready(&mut self) {
        let drawn = self.draw_ready();
        self.show(drawn);
    }

    fn snapshot(&mut self, snapshot: &ReportSnapshot) {
        let drawn = self.draw_snapshot(snapshot);
        self.show(drawn);
    }

    fn sensor_error(&mut self, error: &SensorError) {
        let drawn = self.draw_sensor_error(error);
        self.show(drawn);
    }
}

#[cfg(target_os = "espidf")]
pub use ssd1306_panel::{init_ssd1306, Ssd1306Panel};

#[cfg(target_os = "espidf")]
mod ssd1306_panel {
    use anyhow::anyhow;
    use esp_idf_hal::i2c::I2cDriver;
    use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

    use super::Panel;
    use crate::config::DISPLAY_I2C_ADDR;

    pub type Ssd1306Panel<'d> = Ssd1306<
        I2CInterface<I2cDriver<'d>>,
        DisplaySize128x64,
        BufferedGraphicsMode<DisplaySize128x64>,
    >;

    pub fn init_ssd1306(i2c: I2cDriver<'_>) -> anyhow::Result<Ssd1306Panel<'_>> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display
            .init()
            .map_err(|e| anyhow!("ssd1306 init failed: {e:?}"))?;
        Ok(display)
    }

    impl Panel for Ssd1306Panel<'_> {
        fn present(&mut self) -> anyhow::Result<()> {
            self.flush().map_err(|e| anyhow!("ssd1306 flush failed: {e:?}"))
        }
    }
}
