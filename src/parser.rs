use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Gpx2MapError;
use crate::gpx_types::Waypoint;

type Result<T> = std::result::Result<T, Gpx2MapError>;

/// Parse the <wpt> elements of a GPX document.
///
/// Routes and tracks carry no survey plots and are skipped wholesale,
/// as are waypoints with missing or unparseable coordinates.
pub fn parse_waypoints(xml: &str) -> Result<Vec<Waypoint>> {
    let mut reader = Reader::from_str(xml);
    let mut waypoints = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"wpt" => {
                    if let Some(wpt) = parse_waypoint(&e, &mut reader)? {
                        waypoints.push(wpt);
                    }
                }
                b"rte" | b"trk" => {
                    reader
                        .read_to_end(e.name())
                        .map_err(Gpx2MapError::XmlParse)?;
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"wpt" {
                    if let Ok((lat, lon)) = parse_lat_lon(&e) {
                        waypoints.push(Waypoint::new(lat, lon));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2MapError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(waypoints)
}

/// Parse lat/lon attributes from a <wpt> start tag.
fn parse_lat_lon(e: &BytesStart<'_>) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| Gpx2MapError::XmlParse(e.into()))?;
        let key = attr.key.local_name();
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match key.as_ref() {
            b"lat" => {
                lat = Some(val.parse::<f64>().map_err(|_| {
                    Gpx2MapError::InvalidAttribute {
                        element: "wpt",
                        attribute: "lat",
                        value: val.to_string(),
                    }
                })?);
            }
            b"lon" => {
                lon = Some(val.parse::<f64>().map_err(|_| {
                    Gpx2MapError::InvalidAttribute {
                        element: "wpt",
                        attribute: "lon",
                        value: val.to_string(),
                    }
                })?);
            }
            _ => {}
        }
    }

    let lat = lat.ok_or(Gpx2MapError::MissingAttribute {
        element: "wpt",
        attribute: "lat",
    })?;
    let lon = lon.ok_or(Gpx2MapError::MissingAttribute {
        element: "wpt",
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

/// Parse a <wpt> element and its children.
/// Called after receiving Event::Start for the element.
fn parse_waypoint<'a>(
    start: &BytesStart<'a>,
    reader: &mut Reader<&'a [u8]>,
) -> Result<Option<Waypoint>> {
    let (lat, lon) = match parse_lat_lon(start) {
        Ok(coords) => coords,
        Err(_) => {
            // Skip this waypoint if lat/lon are missing or invalid
            reader
                .read_to_end(start.name())
                .map_err(Gpx2MapError::XmlParse)?;
            return Ok(None);
        }
    };

    let mut wpt = Waypoint::new(lat, lon);
    let end_name = start.name().0.to_vec(); // own the end tag name for comparison

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(Gpx2MapError::XmlParse)?;
                    wpt.ele = text.parse::<f64>().ok();
                }
                b"time" => {
                    wpt.time = Some(read_text_owned(reader, &e)?);
                }
                b"name" => {
                    wpt.name = Some(read_text_owned(reader, &e)?);
                }
                b"desc" => {
                    wpt.desc = Some(read_text_owned(reader, &e)?);
                }
                _ => {
                    // Skip sym/link/extensions and anything else
                    reader
                        .read_to_end(e.name())
                        .map_err(Gpx2MapError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2MapError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(Some(wpt))
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(
    reader: &mut Reader<&'a [u8]>,
    start: &BytesStart<'_>,
) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                let raw = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(raw);
            }
            Ok(Event::CData(e)) => {
                let s = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                text.push_str(s);
            }
            Ok(Event::GeneralRef(e)) => {
                // Character references (&#60; &#x3C;) and predefined entities
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(e.as_ref()).unwrap_or_default();
                    match name {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {} // Unknown entity, skip
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2MapError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}
