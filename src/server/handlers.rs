//! HTTP handlers for the chart endpoints.

use axum::{extract::Query, Json};
use chrono::NaiveTime;
use serde_json::{json, Value};
use tracing::info;

use crate::ephemeris::{
    calc_all_bodies, calc_body_position, calc_houses, calc_phase_angle, date_to_julian_day,
    datetime_to_julian_day, find_next_full_moon, find_next_new_moon, find_next_station,
    house_of, julian_day_to_date, HouseSystem,
};
use crate::models::{
    find_aspect, illumination_from_angle, local_to_utc, parse_date, parse_time,
    validate_location, validate_utc_offset, Aspect, Body, BodyPlacement, ChartQuery,
    ChartResponse, HouseCusps, LunarPhaseName, LunarQuery, LunarResponse, PositionsQuery,
    PositionsResponse, RetrogradeStatus, RetrogradesQuery, RetrogradesResponse,
    UpcomingRetrograde, ZodiacPosition,
};

use super::error::ApiError;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Compute a natal chart for a birth moment and place.
pub async fn chart(Query(q): Query<ChartQuery>) -> Result<Json<ChartResponse>, ApiError> {
    let date = parse_date(&q.date)?;
    let time = parse_time(&q.time)?;
    validate_location(q.lat, q.lon, q.tz)?;

    let julian_day = datetime_to_julian_day(local_to_utc(date, time, q.tz));
    info!(%date, %time, lat = q.lat, lon = q.lon, tz = q.tz, "computing chart");

    let system = HouseSystem::Placidus;
    let houses = calc_houses(julian_day, q.lat, q.lon, system)?;
    let positions = calc_all_bodies(julian_day)?;

    let bodies: Vec<BodyPlacement> = positions
        .iter()
        .map(|(body, pos)| BodyPlacement {
            body: *body,
            position: ZodiacPosition::from_longitude(pos.longitude),
            house: Some(house_of(pos.longitude, &houses.cusps)),
            retrograde: pos.is_retrograde,
        })
        .collect();

    let mut aspects = Vec::new();
    for (i, (body_a, pos_a)) in positions.iter().enumerate() {
        for (body_b, pos_b) in positions.iter().skip(i + 1) {
            if let Some((aspect, orb)) = find_aspect(pos_a.longitude, pos_b.longitude, q.minor) {
                aspects.push(Aspect::new(
                    body_a.to_string(),
                    body_b.to_string(),
                    aspect,
                    round1(orb),
                ));
            }
        }
    }

    Ok(Json(ChartResponse {
        date: q.date.trim().to_string(),
        time: q.time.trim().to_string(),
        latitude: q.lat,
        longitude: q.lon,
        utc_offset_hours: q.tz,
        julian_day,
        bodies,
        ascendant: houses.ascendant_position(),
        midheaven: houses.midheaven_position(),
        houses: HouseCusps {
            system: system.name().to_string(),
            cusps: houses
                .cusps
                .iter()
                .map(|&lon| ZodiacPosition::from_longitude(lon))
                .collect(),
        },
        aspects,
    }))
}

/// Ecliptic positions of all bodies at a moment (defaults to 00:00 UT).
pub async fn positions(
    Query(q): Query<PositionsQuery>,
) -> Result<Json<PositionsResponse>, ApiError> {
    let date = parse_date(&q.date)?;
    let time = match &q.time {
        Some(raw) => parse_time(raw)?,
        None => NaiveTime::MIN,
    };
    let tz = q.tz.unwrap_or(0.0);
    validate_utc_offset(tz)?;

    let julian_day = datetime_to_julian_day(local_to_utc(date, time, tz));

    let bodies: Vec<BodyPlacement> = calc_all_bodies(julian_day)?
        .into_iter()
        .map(|(body, pos)| BodyPlacement {
            body,
            position: ZodiacPosition::from_longitude(pos.longitude),
            house: None,
            retrograde: pos.is_retrograde,
        })
        .collect();

    Ok(Json(PositionsResponse {
        date: q.date.trim().to_string(),
        time: time.format("%H:%M").to_string(),
        julian_day,
        bodies,
    }))
}

/// Lunar phase report for a date.
pub async fn lunar(Query(q): Query<LunarQuery>) -> Result<Json<LunarResponse>, ApiError> {
    let date = parse_date(&q.date)?;
    let julian_day = date_to_julian_day(date);

    let moon = calc_body_position(Body::Moon, julian_day)?;
    let phase_angle = calc_phase_angle(julian_day)?;
    let moon_position = ZodiacPosition::from_longitude(moon.longitude);

    // One synodic month bounds both searches
    let next_new = find_next_new_moon(julian_day, 31)?;
    let next_full = find_next_full_moon(julian_day, 31)?;
    let format_jd = |jd: f64| julian_day_to_date(jd).format("%Y-%m-%d").to_string();

    Ok(Json(LunarResponse {
        date: q.date.trim().to_string(),
        phase: LunarPhaseName::from_phase_angle(phase_angle),
        phase_angle: round1(phase_angle),
        illumination: (illumination_from_angle(phase_angle) * 100.0).round() / 100.0,
        moon_sign: moon_position.sign,
        moon_degree: round1(moon_position.degree),
        next_new_moon: next_new.map(format_jd),
        next_full_moon: next_full.map(format_jd),
    }))
}

/// Retrograde status on a date plus upcoming retrograde periods.
pub async fn retrogrades(
    Query(q): Query<RetrogradesQuery>,
) -> Result<Json<RetrogradesResponse>, ApiError> {
    let date = parse_date(&q.date)?;
    let julian_day = date_to_julian_day(date);
    let days_ahead = q.days_ahead.unwrap_or(90).clamp(1, 366);

    let mut retrograde = Vec::new();
    let mut upcoming = Vec::new();

    for &body in Body::all() {
        if !body.can_retrograde() {
            continue;
        }

        let position = calc_body_position(body, julian_day)?;

        if position.is_retrograde {
            let direct_station = find_next_station(body, julian_day, days_ahead)?
                .map(|(jd, _)| julian_day_to_date(jd).format("%Y-%m-%d").to_string());
            retrograde.push(RetrogradeStatus {
                body: body.to_string(),
                direct_station,
            });
        } else if let Some((start_jd, turning_retrograde)) =
            find_next_station(body, julian_day, days_ahead)?
        {
            if turning_retrograde {
                // Retrograde periods run a few weeks to months; 180 days
                // always covers the direct station
                let end_jd = find_next_station(body, start_jd + 1.0, 180)?
                    .map(|(jd, _)| jd)
                    .unwrap_or(start_jd + 21.0);

                upcoming.push(UpcomingRetrograde {
                    body: body.to_string(),
                    starts: julian_day_to_date(start_jd).format("%Y-%m-%d").to_string(),
                    ends: julian_day_to_date(end_jd).format("%Y-%m-%d").to_string(),
                    days_until: (start_jd - julian_day).round() as i64,
                });
            }
        }
    }

    Ok(Json(RetrogradesResponse {
        date: q.date.trim().to_string(),
        retrograde,
        upcoming,
    }))
}
