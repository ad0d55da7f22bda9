use hifitime::Epoch;
use std::str::FromStr;

use crate::constants::{JDTOMJD, MJD};

/// Transformation from a date in the format YYYY-MM-ddTHH:mm:ss (UTC) to a
/// modified julian date (MJD) in the TT time scale.
///
/// Argument
/// --------
/// * `date`: a date in the format YYYY-MM-ddTHH:mm:ss
///
/// Return
/// ------
/// * the input date as MJD (TT), or an error string when the date cannot be parsed
pub fn date_to_mjd_tt(date: &str) -> Result<MJD, String> {
    Epoch::from_str(date)
        .map(|epoch| epoch.to_mjd_tt_days())
        .map_err(|e| format!("invalid date '{date}': {e}"))
}

/// Transformation from modified julian date (MJD) to julian date (JD)
pub fn mjd_to_jd(mjd: MJD) -> f64 {
    mjd + JDTOMJD
}

/// Transformation from julian date (JD) to modified julian date (MJD)
pub fn jd_to_mjd(jd: f64) -> MJD {
    jd - JDTOMJD
}
