use log::info;
use luxservo::actuator::StepDriver;
use luxservo::config::ControlConfig;
use luxservo::control::ControlLoop;
use luxservo::report::ConsoleDashboard;

fn load_config() -> anyhow::Result<ControlConfig> {
    let config = ControlConfig::default();
    config.validate()?;
    info!("control config: {}", serde_json::to_string(&config)?);
    Ok(config)
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
    use esp_idf_svc::hal::prelude::Peripherals;
    use esp_idf_svc::hal::units::Hertz;
    use luxservo::config::{DISPLAY_I2C_BAUDRATE_HZ, SENSOR_I2C_BAUDRATE_HZ};
    use luxservo::report::oled::init_ssd1306;
    use luxservo::report::OledDashboard;
    use luxservo::sensor::Bh1750Sensor;
    use luxservo::servo::{Servo, PWM_FREQ_HZ};

    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = load_config()?;
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // BH1750 on I2C0: SDA GPIO21, SCL GPIO22
    let sensor_i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio21,
        pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(SENSOR_I2C_BAUDRATE_HZ)),
    )?;
    let sensor = Bh1750Sensor::new(sensor_i2c);
    info!("BH1750 ready");

    // SSD1306 on I2C1: SDA GPIO14, SCL GPIO15
    let display_i2c = I2cDriver::new(
        peripherals.i2c1,
        pins.gpio14,
        pins.gpio15,
        &I2cConfig::new().baudrate(Hertz(DISPLAY_I2C_BAUDRATE_HZ)),
    )?;
    let oled = OledDashboard::new(init_ssd1306(display_i2c)?);
    info!("OLED ready");

    // Servo signal on GPIO2
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(PWM_FREQ_HZ))
            .resolution(Resolution::Bits14),
    )?;
    let servo = Servo {
        channel_driver: LedcDriver::new(peripherals.ledc.channel0, &timer, pins.gpio2)?,
    };
    info!("servo ready");

    let driver = StepDriver::new(
        servo,
        FreeRtos,
        config.neutral_position,
        config.initial_step_interval(),
    );
    let sinks = (ConsoleDashboard::stdout(), oled);
    ControlLoop::new(sensor, driver, FreeRtos, sinks, config).run()
}

/// Desktop build: same loop, simulated light and servo, console output only.
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use luxservo::sim::{init_logging, RampSensor, StdDelay, TraceServo};

    init_logging()?;
    let config = load_config()?;
    let sensor = RampSensor::new(1200.0, 25.0).with_dropouts(40);
    let driver = StepDriver::new(
        TraceServo::default(),
        StdDelay,
        config.neutral_position,
        config.initial_step_interval(),
    );
    ControlLoop::new(sensor, driver, StdDelay, ConsoleDashboard::stdout(), config).run()
}
