use super::super::domain::{BiometricReading, BiometricScores, RiskLevel};

pub fn score_biometrics(reading: &BiometricReading) -> BiometricScores {
    BiometricScores {
        bp: blood_pressure_risk(reading.sbp, reading.dbp),
        hr: heart_rate_risk(reading.bpm),
        temp: temperature_risk(reading.temp),
        face: reading.face.risk(),
    }
}

/// Worst of systolic and diastolic, high or low.
pub fn blood_pressure_risk(sbp: f64, dbp: f64) -> RiskLevel {
    if sbp >= 180.0 || dbp >= 110.0 || sbp < 80.0 || dbp < 50.0 {
        RiskLevel::CRITICAL
    } else if sbp >= 160.0 || dbp >= 100.0 || sbp < 90.0 || dbp < 60.0 {
        RiskLevel::HIGH
    } else if sbp >= 140.0 || dbp >= 90.0 || sbp < 95.0 || dbp < 65.0 {
        RiskLevel::MONITOR
    } else {
        RiskLevel::NONE
    }
}

pub fn heart_rate_risk(bpm: f64) -> RiskLevel {
    if bpm > 120.0 || bpm < 40.0 {
        RiskLevel::CRITICAL
    } else if bpm > 110.0 || bpm < 50.0 {
        RiskLevel::HIGH
    } else if bpm > 100.0 || bpm < 60.0 {
        RiskLevel::MONITOR
    } else {
        RiskLevel::NONE
    }
}

pub fn temperature_risk(celsius: f64) -> RiskLevel {
    if celsius > 38.5 || celsius < 35.5 {
        RiskLevel::CRITICAL
    } else if celsius > 38.0 || celsius < 36.0 {
        RiskLevel::HIGH
    } else if celsius > 37.5 || celsius < 36.5 {
        RiskLevel::MONITOR
    } else {
        RiskLevel::NONE
    }
}
