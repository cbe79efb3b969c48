//! HDC1080 temperature and humidity sensor
//!
//! Each reading triggers one conversion by writing the register pointer, waits
//! for the conversion, then reads the 16-bit result.

use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_rp::i2c::{self, Async, I2c as RpI2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;
use static_cell::StaticCell;
use switchboard::system::drivers::Sensor;
use switchboard::system::error::SensorError;

use super::resources::{Irqs, SensorResources};

const ADDRESS: u8 = 0x40;
const TEMPERATURE_REGISTER: u8 = 0x00;
const HUMIDITY_REGISTER: u8 = 0x01;

/// 14-bit conversion takes 6.5 ms; leave some slack
const CONVERSION_TIME: Duration = Duration::from_millis(10);

pub type SensorBus =
    I2cDevice<'static, CriticalSectionRawMutex, RpI2c<'static, I2C0, Async>>;

static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, RpI2c<'static, I2C0, Async>>> =
    StaticCell::new();

/// Brings up I2C0 and returns a device handle on the shared bus.
///
/// Must only be called once.
pub fn bus(r: SensorResources) -> SensorBus {
    let mut config = i2c::Config::default();
    config.frequency = 400_000;
    let i2c = RpI2c::new_async(r.i2c, r.scl, r.sda, Irqs, config);
    I2cDevice::new(I2C_BUS.init(Mutex::new(i2c)))
}

pub struct Hdc1080<B> {
    bus: B,
}

impl<B: I2c> Hdc1080<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    async fn sample(&mut self, register: u8) -> Result<u16, SensorError> {
        self.bus
            .write(ADDRESS, &[register])
            .await
            .map_err(|_| SensorError::Bus)?;
        Timer::after(CONVERSION_TIME).await;

        let mut raw = [0u8; 2];
        // the sensor NAKs reads until the conversion is done
        self.bus
            .read(ADDRESS, &mut raw)
            .await
            .map_err(|_| SensorError::NotReady)?;
        Ok(u16::from_be_bytes(raw))
    }
}

impl<B: I2c> Sensor for Hdc1080<B> {
    async fn read_temperature(&mut self) -> Result<i32, SensorError> {
        let raw = self.sample(TEMPERATURE_REGISTER).await?;
        Ok(i32::from(raw) * 165 / 65536 - 40)
    }

    async fn read_humidity(&mut self) -> Result<i32, SensorError> {
        let raw = self.sample(HUMIDITY_REGISTER).await?;
        Ok(i32::from(raw) * 100 / 65536)
    }
}
