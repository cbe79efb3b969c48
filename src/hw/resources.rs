//! Hardware Resource Management
//!
//! Assigns the RP2350 pins and peripherals to the adapter that owns them.
//!
//! # Resource Groups
//! - Display: seven segment lines plus the two common-cathode enables
//! - Stepper: four coil lines of the ULN2003 board
//! - Strip: PIO block, DMA channel and data pin of the WS2812 strip
//! - Sensor: I2C bus of the HDC1080
//! - Switches: the 8-way DIP bank and the two push buttons in use

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0, PIO0};
use embassy_rp::pio::InterruptHandler as PioInterruptHandler;

assign_resources! {
    /// Two-digit common-cathode seven-segment display
    display: DisplayResources {
        seg_a: PIN_2,
        seg_b: PIN_3,
        seg_c: PIN_4,
        seg_d: PIN_5,
        seg_e: PIN_6,
        seg_f: PIN_7,
        seg_g: PIN_8,
        seg_dp: PIN_9,
        left_enable: PIN_10,
        right_enable: PIN_11,
    },
    /// 28BYJ-48 stepper through a ULN2003 driver
    stepper: StepperResources {
        in1: PIN_12,
        in2: PIN_13,
        in3: PIN_14,
        in4: PIN_15,
    },
    /// WS2812 strip on PIO0
    strip: StripResources {
        pio: PIO0,
        dma: DMA_CH0,
        data_pin: PIN_16,
    },
    /// HDC1080 temperature and humidity sensor
    sensor: SensorResources {
        i2c: I2C0,
        sda: PIN_20,
        scl: PIN_21,
    },
    /// Mode-select DIP bank (DIP1..DIP8) and push buttons
    switches: SwitchResources {
        dip1: PIN_0,
        dip2: PIN_1,
        dip3: PIN_17,
        dip4: PIN_18,
        dip5: PIN_19,
        dip6: PIN_22,
        dip7: PIN_26,
        dip8: PIN_27,
        primary: PIN_28,
        secondary: PIN_25,
    },
}

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
