//! Parent/ownership resolution for highlight links
//!
//! Finds the PCB component, source component and source port behind an
//! element. Lookups go through id maps built once per element collection;
//! the first record with a given id wins, as a front-to-back scan would.

use indexmap::IndexMap;

use crate::circuit::{CircuitElement, PcbComponent, PcbPort, SourceComponent, SourcePort};
use crate::draw::geometry::PrimitiveMeta;

/// Id index over one element collection
#[derive(Debug, Default)]
pub struct MetadataLinker<'a> {
    pcb_components: IndexMap<&'a str, &'a PcbComponent>,
    source_components: IndexMap<&'a str, &'a SourceComponent>,
    pcb_ports: IndexMap<&'a str, &'a PcbPort>,
    source_ports: IndexMap<&'a str, &'a SourcePort>,
}

impl<'a> MetadataLinker<'a> {
    pub fn new(all_elements: &'a [CircuitElement]) -> Self {
        let mut linker = Self::default();
        for element in all_elements {
            match element {
                CircuitElement::PcbComponent(c) => {
                    linker.pcb_components.entry(c.pcb_component_id.as_str()).or_insert(c);
                }
                CircuitElement::SourceComponent(c) => {
                    linker.source_components.entry(c.source_component_id.as_str()).or_insert(c);
                }
                CircuitElement::PcbPort(p) => {
                    linker.pcb_ports.entry(p.pcb_port_id.as_str()).or_insert(p);
                }
                CircuitElement::SourcePort(p) => {
                    linker.source_ports.entry(p.source_port_id.as_str()).or_insert(p);
                }
                _ => {}
            }
        }
        linker
    }

    pub fn pcb_component(&self, id: &str) -> Option<&'a PcbComponent> {
        self.pcb_components.get(id).copied()
    }

    pub fn source_component(&self, id: &str) -> Option<&'a SourceComponent> {
        self.source_components.get(id).copied()
    }

    pub fn pcb_port(&self, id: &str) -> Option<&'a PcbPort> {
        self.pcb_ports.get(id).copied()
    }

    pub fn source_port(&self, id: &str) -> Option<&'a SourcePort> {
        self.source_ports.get(id).copied()
    }

    /// Full link set for `element`
    pub fn resolve(&self, element: &'a CircuitElement) -> PrimitiveMeta<'a> {
        let parent_pcb_component = element
            .pcb_component_id()
            .and_then(|id| self.pcb_component(id));

        let parent_source_component = parent_pcb_component
            .and_then(|c| c.source_component_id.as_deref())
            .and_then(|id| self.source_component(id));

        let source_port_id = match element.source_port_id() {
            Some(id) => Some(id),
            None => element
                .pcb_port_id()
                .and_then(|id| self.pcb_port(id))
                .and_then(|port| port.source_port_id.as_deref()),
        };
        let source_port = source_port_id.and_then(|id| self.source_port(id));

        PrimitiveMeta {
            element: Some(element),
            parent_pcb_component,
            parent_source_component,
            source_port,
        }
    }
}
