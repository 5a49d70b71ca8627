//! Device names reported by the stock garden controller firmware.
//!
//! The device set is fixed by the firmware; these names are the ones its
//! `get` response uses. They are plain strings so that configuration can
//! refer to any other name without a code change.

use crate::id::DeviceId;

/// Fish tank float switch. `0`: water too low, `1`: level ok.
pub const FISH_TANK_FLOAT_SWITCH: &str = "FloatSwitch";
pub const MAIN_SWITCH: &str = "RelaySwitch0";
/// Valve releasing water from the grow bed.
pub const GROW_BED_VALVE: &str = "RelaySwitch1";
/// Top-left outlet.
pub const FISH_TANK_HEATER: &str = "RelaySwitch2";
/// Bottom-left outlet.
pub const WATER_PUMP: &str = "RelaySwitch3";
pub const OUTLET_TOP_RIGHT: &str = "RelaySwitch4";
pub const OUTLET_BOTTOM_RIGHT: &str = "RelaySwitch5";
/// DHT-22 temperature in the main box.
pub const MAIN_BOX_TEMPERATURE: &str = "DHT22Sensor0temp";
/// DHT-22 humidity in the main box.
pub const MAIN_BOX_HUMIDITY: &str = "DHT22Sensor0humidity";
/// DS18B20 probe in the fish tank.
pub const FISH_TANK_TEMPERATURE: &str = "DS18B20Sensorprobe0temp";
/// DS18B20 probe in the grow bed.
pub const GROW_BED_TEMPERATURE: &str = "DS18B20Sensorprobe1temp";
/// Ultrasonic distance from the top of the fish tank to the water, in inches.
pub const FISH_TANK_WATER_DISTANCE: &str = "HCSR04Sensor0";

/// [`WATER_PUMP`] as an identifier, the actuator scheduled by default.
#[must_use]
pub fn water_pump() -> DeviceId {
    DeviceId::from_wire(WATER_PUMP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_valid_device_ids() {
        let names = [
            FISH_TANK_FLOAT_SWITCH,
            MAIN_SWITCH,
            GROW_BED_VALVE,
            FISH_TANK_HEATER,
            WATER_PUMP,
            OUTLET_TOP_RIGHT,
            OUTLET_BOTTOM_RIGHT,
            MAIN_BOX_TEMPERATURE,
            MAIN_BOX_HUMIDITY,
            FISH_TANK_TEMPERATURE,
            GROW_BED_TEMPERATURE,
            FISH_TANK_WATER_DISTANCE,
        ];
        for name in names {
            assert!(DeviceId::new(name).is_ok(), "{name} should be a valid id");
        }
    }

    #[test]
    fn should_build_water_pump_id() {
        assert_eq!(water_pump(), DeviceId::new(WATER_PUMP).unwrap());
    }
}
