//! Capability-descriptor document builder.
//!
//! Assembles the self-description XML a remote peer fetches before issuing
//! any attribute command: a fixed prolog (XML declaration, context DTD and
//! the `<context>` open tag), one driver-supplied fragment per registered
//! interface in registration order, and the closing tag.  Fragment content
//! is entirely the driver's responsibility; this module only concatenates.
//!
//! Growth goes through `try_reserve` so an allocation failure surfaces as
//! [`Error::OutOfMemory`] instead of aborting.

use crate::error::{Error, Result};
use crate::registry::Registry;

/// Document prolog: XML declaration plus the context DTD.
pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
<!DOCTYPE context [\
<!ELEMENT context (device | context-attribute)*>\
<!ELEMENT context-attribute EMPTY>\
<!ELEMENT device (channel | attribute | debug-attribute | buffer-attribute)*>\
<!ELEMENT channel (scan-element?, attribute*)>\
<!ELEMENT attribute EMPTY>\
<!ELEMENT scan-element EMPTY>\
<!ELEMENT debug-attribute EMPTY>\
<!ELEMENT buffer-attribute EMPTY>\
<!ATTLIST context name CDATA #REQUIRED description CDATA #IMPLIED>\
<!ATTLIST context-attribute name CDATA #REQUIRED value CDATA #REQUIRED>\
<!ATTLIST device id CDATA #REQUIRED name CDATA #IMPLIED>\
<!ATTLIST channel id CDATA #REQUIRED type (input|output) #REQUIRED name CDATA #IMPLIED>\
<!ATTLIST scan-element index CDATA #REQUIRED format CDATA #REQUIRED scale CDATA #IMPLIED>\
<!ATTLIST attribute name CDATA #REQUIRED filename CDATA #IMPLIED>\
<!ATTLIST debug-attribute name CDATA #REQUIRED>\
<!ATTLIST buffer-attribute name CDATA #REQUIRED>\
]>";

/// Document footer.
pub const XML_FOOTER: &str = "</context>";

fn context_open() -> String {
    format!(
        "<context name=\"xml\" description=\"attrlink {}\" >",
        env!("CARGO_PKG_VERSION")
    )
}

fn reserve(out: &mut String, additional: usize) -> Result<()> {
    out.try_reserve(additional).map_err(|_| Error::OutOfMemory)
}

fn push(out: &mut String, part: &str) -> Result<()> {
    reserve(out, part.len())?;
    out.push_str(part);
    Ok(())
}

/// Build the full capability-descriptor document for every interface in
/// `reg`, in registration order.
///
/// A driver without a fragment ([`Error::NotSupported`]) contributes
/// nothing; any other fragment error aborts the build.
pub fn context_xml(reg: &Registry) -> Result<String> {
    let mut out = String::new();
    push(&mut out, XML_PROLOG)?;
    push(&mut out, &context_open())?;

    for iface in reg.iter() {
        match iface.ops().xml_fragment(&mut out) {
            Ok(()) | Err(Error::NotSupported) => {}
            Err(e) => return Err(e),
        }
    }

    push(&mut out, XML_FOOTER)?;
    Ok(out)
}
