//! In-process lookups through hickory-resolver.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use hickory_resolver::{
    ResolveError, TokioResolver,
    proto::{
        ProtoErrorKind,
        dnssec::{PublicKey, rdata::DNSSECRData},
        op::ResponseCode,
        rr::{Record, RecordType as WireType, record_data::RData},
    },
};

use dns_dumper_core::{DnsResolver, RecordType, ResolveFailure};

use super::resolver::{SYSTEM_LABEL, build_tokio_resolver};

/// [`DnsResolver`] backed by a hickory `TokioResolver`.
pub struct HickoryResolver {
    resolver: TokioResolver,
    label: String,
}

impl HickoryResolver {
    /// Query `nameserver`, or the system configuration when `None`.
    #[must_use]
    pub fn new(nameserver: Option<IpAddr>, timeout: Duration) -> Self {
        let label = nameserver.map_or_else(|| SYSTEM_LABEL.clone(), |ip| ip.to_string());
        Self {
            resolver: build_tokio_resolver(nameserver, timeout),
            label,
        }
    }

    async fn lookup_records(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>, ResolveFailure> {
        let wire_type = wire_type(record_type);
        match self.resolver.lookup(name, wire_type).await {
            // Answers may carry the CNAME chain; keep only the asked-for type.
            Ok(response) => Ok(response
                .record_iter()
                .filter(|r| r.record_type() == wire_type)
                .cloned()
                .collect()),
            Err(e) => negative_answer(&e, record_type),
        }
    }
}

#[async_trait]
impl DnsResolver for HickoryResolver {
    async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, ResolveFailure> {
        let records = self.lookup_records(name, record_type).await?;
        Ok(records
            .iter()
            .filter_map(|record| {
                let value = format_rdata(record.data());
                if value.is_none() {
                    log::warn!(
                        "Unexpected RData type in {record_type} answer for {name}: {:?}",
                        record.data()
                    );
                }
                value
            })
            .collect())
    }

    async fn resolve_detailed(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<String>, ResolveFailure> {
        let records = self.lookup_records(name, record_type).await?;
        if records.is_empty() {
            return Ok(None);
        }

        let mut out = format!(";; SERVER: {}\n;; ANSWER SECTION:\n", self.label);
        for record in &records {
            let value = format_rdata(record.data()).unwrap_or_default();
            out.push_str(&format!(
                "{}\t{}\tIN\t{}\t{}\n",
                record.name(),
                record.ttl(),
                record.record_type(),
                value
            ));
        }
        Ok(Some(out))
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// A reply without records is an empty answer only under `NOERROR`.
fn negative_answer(err: &ResolveError, record_type: RecordType) -> Result<Vec<Record>, ResolveFailure> {
    match negative_response_code(err) {
        Some(ResponseCode::NoError) => Ok(Vec::new()),
        Some(ResponseCode::NXDomain) => Err(ResolveFailure::new("NXDOMAIN")),
        _ => Err(ResolveFailure::new(format!("{record_type} lookup failed: {err}"))),
    }
}

fn negative_response_code(err: &ResolveError) -> Option<ResponseCode> {
    match err.proto()?.kind() {
        ProtoErrorKind::NoRecordsFound { response_code, .. } => Some(*response_code),
        _ => None,
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Cname => WireType::CNAME,
        RecordType::Mx => WireType::MX,
        RecordType::Ns => WireType::NS,
        RecordType::Txt => WireType::TXT,
        RecordType::Soa => WireType::SOA,
        RecordType::Ptr => WireType::PTR,
        RecordType::Srv => WireType::SRV,
        RecordType::Caa => WireType::CAA,
        RecordType::Dnskey => WireType::DNSKEY,
        RecordType::Ds => WireType::DS,
    }
}

fn trim_dot(name: &impl ToString) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

/// Render record data the way `dig +short` would, minus trailing dots.
fn format_rdata(data: &RData) -> Option<String> {
    let value = match data {
        RData::A(ip) => ip.to_string(),
        RData::AAAA(ip) => ip.to_string(),
        RData::CNAME(cname) => trim_dot(&cname.0),
        RData::NS(ns) => trim_dot(&ns.0),
        RData::PTR(ptr) => trim_dot(&ptr.0),
        RData::MX(mx) => format!("{} {}", mx.preference(), trim_dot(mx.exchange())),
        RData::TXT(txt) => txt
            .iter()
            .map(|data| String::from_utf8_lossy(data).to_string())
            .collect::<String>(),
        RData::SOA(soa) => format!(
            "{} {} {} {} {} {} {}",
            trim_dot(soa.mname()),
            trim_dot(soa.rname()),
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum()
        ),
        RData::SRV(srv) => format!(
            "{} {} {} {}",
            srv.priority(),
            srv.weight(),
            srv.port(),
            trim_dot(srv.target())
        ),
        RData::CAA(caa) => format!(
            "{} {} \"{}\"",
            if caa.issuer_critical() { 128 } else { 0 },
            caa.tag().as_str(),
            String::from_utf8_lossy(caa.raw_value())
        ),
        RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) => {
            let public_key = dnskey.public_key();
            let algorithm: u8 = public_key.algorithm().into();
            format!(
                "{} 3 {} {}",
                dnskey.flags(),
                algorithm,
                STANDARD.encode(public_key.public_bytes())
            )
        }
        RData::DNSSEC(DNSSECRData::DS(ds)) => {
            let algorithm: u8 = ds.algorithm().into();
            let digest_type: u8 = ds.digest_type().into();
            format!(
                "{} {} {} {}",
                ds.key_tag(),
                algorithm,
                digest_type,
                hex::encode_upper(ds.digest())
            )
        }
        _ => return None,
    };
    Some(value)
}
