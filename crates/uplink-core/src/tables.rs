//! Translation tables from device-encoded keys to display labels.
//!
//! The raw key spaces are closed sets, so each is an enum. A raw key outside
//! the set is not rejected: it resolves to [`Label::Undefined`], which keys the
//! field by the literal text `undefined`. Several misses in one message
//! therefore collide on the same field name.

use std::fmt;

/// Display label resolved from a raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Known(&'static str),
    Undefined,
}

impl Label {
    /// Field name used for a lookup miss.
    pub const UNDEFINED: &'static str = "undefined";

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Known(label) => label,
            Label::Undefined => Self::UNDEFINED,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Label::Known(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed enumeration of raw keys with a display label for each.
pub trait TranslationTable: Copy + 'static {
    /// Raw key to variant, in table order.
    const ENTRIES: &'static [(&'static str, Self)];

    /// Display label for this key.
    fn label(self) -> &'static str;

    /// Exact, case-sensitive lookup of a raw key.
    fn from_raw(raw: &str) -> Option<Self> {
        Self::ENTRIES
            .iter()
            .find(|(key, _)| *key == raw)
            .map(|(_, variant)| *variant)
    }

    /// Resolve a raw key straight to its label.
    fn lookup(raw: &str) -> Label {
        match Self::from_raw(raw) {
            Some(variant) => Label::Known(variant.label()),
            None => Label::Undefined,
        }
    }
}

/// Environment sensor keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKey {
    Pm25,
    Pm10,
    Temperature,
    Noise,
    Humidity,
    Illumination,
    BarometricPressure,
    WindSpeed,
}

impl TranslationTable for EnvironmentKey {
    const ENTRIES: &'static [(&'static str, Self)] = &[
        ("PM2.5", Self::Pm25),
        ("PM10", Self::Pm10),
        ("Temp", Self::Temperature),
        ("Noise", Self::Noise),
        ("Humid", Self::Humidity),
        ("illumination", Self::Illumination),
        ("barometric pressure", Self::BarometricPressure),
        ("windspeed", Self::WindSpeed),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::Temperature => "温度",
            Self::Noise => "噪音",
            Self::Humidity => "湿度",
            Self::Illumination => "亮度",
            Self::BarometricPressure => "气压",
            Self::WindSpeed => "风速",
        }
    }
}

/// Door lock states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
    Exception,
}

impl TranslationTable for LockState {
    const ENTRIES: &'static [(&'static str, Self)] = &[
        ("lock", Self::Locked),
        ("unlock", Self::Unlocked),
        ("exception", Self::Exception),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Locked => "关",
            Self::Unlocked => "开",
            Self::Exception => "异常",
        }
    }
}

/// Power consumption periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerPeriod {
    Week,
    Month,
    Year,
}

impl TranslationTable for PowerPeriod {
    const ENTRIES: &'static [(&'static str, Self)] = &[
        ("week", Self::Week),
        ("month", Self::Month),
        ("year", Self::Year),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Week => "周用电量",
            Self::Month => "月用电量",
            Self::Year => "年用电量",
        }
    }
}

/// Alarm codes shared by the power and screen alarm topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmType {
    PowerOff,
    BelowCurrent,
    OverCurrent,
    BelowVoltage,
    OverVoltage,
}

impl AlarmType {
    /// Field name every alarm is reported under.
    pub const FIELD: &'static str = "报警类型";
}

impl TranslationTable for AlarmType {
    const ENTRIES: &'static [(&'static str, Self)] = &[
        ("Poweroff", Self::PowerOff),
        ("belowCurrent", Self::BelowCurrent),
        ("overCurrent", Self::OverCurrent),
        ("belowVoltage", Self::BelowVoltage),
        ("overVoltage", Self::OverVoltage),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::PowerOff => "断电",
            Self::BelowCurrent => "欠电流",
            Self::OverCurrent => "过电流",
            Self::BelowVoltage => "欠电压",
            Self::OverVoltage => "过电压",
        }
    }
}

/// Field name for the lock at zero-based `index`.
pub fn lock_field(index: usize) -> String {
    format!("门锁{}状态", index + 1)
}
