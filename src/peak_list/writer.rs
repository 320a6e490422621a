//! Canonical XML serialization for "peaklist.xml" documents
//!
//! Attribute order, two-space indentation, and numeric formatting are fixed
//! so that a document parsed from canonical XML serializes back byte for
//! byte. Absent optional attributes are omitted rather than written empty.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::error::PeakListError;
use super::models::{
    Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakListDocument, DATETIME_FORMAT,
};

impl PeakListDocument {
    /// Serialize the document back to XML text.
    pub fn to_xml(&self) -> Result<String, PeakListError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_peak_list(&mut writer, &self.root)?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

fn write_peak_list(
    writer: &mut Writer<Vec<u8>>,
    peak_list: &PeakList,
) -> Result<(), PeakListError> {
    let mut start = BytesStart::new("PeakList");
    if let Some(modified) = &peak_list.modified {
        let value = modified.format(DATETIME_FORMAT).to_string();
        start.push_attribute(("modified", value.as_str()));
    }

    if peak_list.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &peak_list.children {
        write_peak_list_1d(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new("PeakList")))?;

    Ok(())
}

fn write_peak_list_1d(
    writer: &mut Writer<Vec<u8>>,
    list: &PeakList1D,
) -> Result<(), PeakListError> {
    let start = BytesStart::new("PeakList1D");

    if list.header.is_none() && list.peaks.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(header) = &list.header {
        write_header(writer, header)?;
    }
    for peak in &list.peaks {
        write_peak(writer, peak)?;
    }
    writer.write_event(Event::End(BytesEnd::new("PeakList1D")))?;

    Ok(())
}

fn write_header(
    writer: &mut Writer<Vec<u8>>,
    header: &PeakList1DHeader,
) -> Result<(), PeakListError> {
    let mut start = BytesStart::new("PeakList1DHeader");

    if let Some(creator) = &header.creator {
        start.push_attribute(("creator", creator.as_str()));
    }
    if let Some(date) = &header.date {
        let value = date.format(DATETIME_FORMAT).to_string();
        start.push_attribute(("date", value.as_str()));
    }
    if let Some(exp_no) = header.exp_no {
        let value = exp_no.to_string();
        start.push_attribute(("expNo", value.as_str()));
    }
    if let Some(name) = &header.name {
        start.push_attribute(("name", name.as_str()));
    }
    if let Some(owner) = &header.owner {
        start.push_attribute(("owner", owner.as_str()));
    }
    if let Some(proc_no) = header.proc_no {
        let value = proc_no.to_string();
        start.push_attribute(("procNo", value.as_str()));
    }
    if let Some(source) = &header.source {
        start.push_attribute(("source", source.as_str()));
    }

    match &header.details {
        Some(details) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Start(BytesStart::new("PeakPickDetails")))?;
            writer.write_event(Event::Text(BytesText::new(&details.format_content())))?;
            writer.write_event(Event::End(BytesEnd::new("PeakPickDetails")))?;
            writer.write_event(Event::End(BytesEnd::new("PeakList1DHeader")))?;
        }
        None => writer.write_event(Event::Empty(start))?,
    }

    Ok(())
}

fn write_peak(writer: &mut Writer<Vec<u8>>, peak: &Peak1D) -> Result<(), PeakListError> {
    let mut start = BytesStart::new("Peak1D");

    if let Some(f1) = peak.f1 {
        let value = f1.to_string();
        start.push_attribute(("F1", value.as_str()));
    }
    if let Some(intensity) = peak.intensity {
        let value = intensity.to_string();
        start.push_attribute(("intensity", value.as_str()));
    }
    if let Some(kind) = peak.kind {
        let value = kind.to_string();
        start.push_attribute(("type", value.as_str()));
    }

    writer.write_event(Event::Empty(start))?;

    Ok(())
}
