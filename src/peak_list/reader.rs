//! Pull-based reader for "peaklist.xml" documents using quick-xml

use chrono::NaiveDateTime;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::PeakListError;
use super::models::{
    Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakListDocument, PeakPickDetails,
    DATETIME_FORMAT,
};

impl PeakListDocument {
    /// Parse a "peaklist.xml" document from its text.
    ///
    /// Returns `Ok(None)` when the input is well-formed XML whose root
    /// element is not `<PeakList>`, mirroring how callers probe files of
    /// unknown provenance.
    pub fn parse(xml: &str) -> Result<Option<Self>, PeakListError> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    return if e.name().as_ref() == b"PeakList" {
                        let root = parse_peak_list(&mut reader, &e)?;
                        Ok(Some(Self { root }))
                    } else {
                        Ok(None)
                    };
                }
                Event::Empty(e) => {
                    return if e.name().as_ref() == b"PeakList" {
                        let root = peak_list_from_attributes(&e)?;
                        Ok(Some(Self { root }))
                    } else {
                        Ok(None)
                    };
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}

fn peak_list_from_attributes(e: &BytesStart) -> Result<PeakList, PeakListError> {
    let modified = match get_attribute(e, "modified")? {
        Some(raw) => Some(parse_datetime(&raw, "modified")?),
        None => None,
    };

    Ok(PeakList {
        modified,
        children: Vec::new(),
    })
}

fn parse_peak_list(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<PeakList, PeakListError> {
    let mut peak_list = peak_list_from_attributes(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"PeakList1D" => {
                peak_list.children.push(parse_peak_list_1d(reader)?);
            }
            Event::Empty(e) if e.name().as_ref() == b"PeakList1D" => {
                peak_list.children.push(PeakList1D::default());
            }
            Event::End(e) if e.name().as_ref() == b"PeakList" => return Ok(peak_list),
            Event::Eof => return Err(unexpected_eof("PeakList")),
            _ => {}
        }
    }
}

fn parse_peak_list_1d(reader: &mut Reader<&[u8]>) -> Result<PeakList1D, PeakListError> {
    let mut list = PeakList1D::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                // Only the first header is kept; the tree holds one per list.
                b"PeakList1DHeader" if list.header.is_none() => {
                    list.header = Some(parse_header(reader, &e)?);
                }
                b"Peak1D" => list.peaks.push(peak_from_attributes(&e)?),
                _ => {}
            },
            // A header without <PeakPickDetails> may arrive self-closed.
            Event::Empty(e) => match e.name().as_ref() {
                b"PeakList1DHeader" if list.header.is_none() => {
                    list.header = Some(header_from_attributes(&e)?);
                }
                b"Peak1D" => list.peaks.push(peak_from_attributes(&e)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PeakList1D" => return Ok(list),
            Event::Eof => return Err(unexpected_eof("PeakList1D")),
            _ => {}
        }
    }
}

fn header_from_attributes(e: &BytesStart) -> Result<PeakList1DHeader, PeakListError> {
    Ok(PeakList1DHeader {
        creator: get_attribute(e, "creator")?,
        date: match get_attribute(e, "date")? {
            Some(raw) => Some(parse_datetime(&raw, "date")?),
            None => None,
        },
        exp_no: parse_int_attribute(e, "expNo")?,
        name: get_attribute(e, "name")?,
        owner: get_attribute(e, "owner")?,
        proc_no: parse_int_attribute(e, "procNo")?,
        source: get_attribute(e, "source")?,
        details: None,
    })
}

fn parse_header(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<PeakList1DHeader, PeakListError> {
    let mut header = header_from_attributes(start)?;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"PeakPickDetails" => {
                let details = parse_details(reader)?;
                if header.details.is_none() {
                    header.details = details;
                }
            }
            Event::End(e) if e.name().as_ref() == b"PeakList1DHeader" => return Ok(header),
            Event::Eof => return Err(unexpected_eof("PeakList1DHeader")),
            _ => {}
        }
    }
}

/// Read the text content of a `<PeakPickDetails>` element. Content that does
/// not match the fixed grammar yields `None` rather than an error, as the
/// element is advisory.
fn parse_details(reader: &mut Reader<&[u8]>) -> Result<Option<PeakPickDetails>, PeakListError> {
    let mut details = None;

    loop {
        match reader.read_event()? {
            Event::Text(t) => {
                details = PeakPickDetails::parse_content(&t.unescape()?);
            }
            Event::End(e) if e.name().as_ref() == b"PeakPickDetails" => return Ok(details),
            Event::Eof => return Err(unexpected_eof("PeakPickDetails")),
            _ => {}
        }
    }
}

fn peak_from_attributes(e: &BytesStart) -> Result<Peak1D, PeakListError> {
    Ok(Peak1D {
        f1: parse_float_attribute(e, "F1")?,
        intensity: parse_float_attribute(e, "intensity")?,
        kind: parse_int_attribute(e, "type")?,
    })
}

fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, PeakListError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name.as_bytes() {
            // Entity references in attribute values resolve to their
            // characters, symmetric with the escaping applied on write.
            let raw = std::str::from_utf8(&attr.value)?;
            let value = unescape(raw).map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn parse_int_attribute(e: &BytesStart, name: &'static str) -> Result<Option<i64>, PeakListError> {
    match get_attribute(e, name)? {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| PeakListError::InvalidAttribute(name, raw)),
        None => Ok(None),
    }
}

fn parse_float_attribute(e: &BytesStart, name: &'static str) -> Result<Option<f64>, PeakListError> {
    match get_attribute(e, name)? {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| PeakListError::InvalidAttribute(name, raw)),
        None => Ok(None),
    }
}

fn parse_datetime(raw: &str, name: &'static str) -> Result<NaiveDateTime, PeakListError> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
        .map_err(|_| PeakListError::InvalidAttribute(name, raw.to_string()))
}

fn unexpected_eof(element: &str) -> PeakListError {
    PeakListError::InvalidStructure(format!("unexpected end of input inside <{element}>"))
}
