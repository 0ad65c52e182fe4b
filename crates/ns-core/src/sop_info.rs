//! Typed accessors over one geometry node's info report.
//!
//! [`SopInfo`] holds a single captured snapshot. Every accessor re-reads the
//! sections it needs from that snapshot and decodes them on the spot; nothing
//! is cached. Sections the host did not emit read as empty or absent values,
//! while malformed content surfaces as an error.

use chrono::NaiveDateTime;
use serde::Serialize;

use ns_common::sections::{
    self, fields, DEPENDENCY, GENERAL_INFO, OPERATOR_INFO, SCRIPT_OPERATOR_INFO, SOP_INFO,
    SUBNETWORK_SOP_INFO,
};
use ns_common::{Error, ReportNode, Result};
use ns_decode::{
    attributes_in, decode_counts, decode_date, decode_megabytes, decode_seconds, decode_vector3,
    sparse_volumes_in, volumes_in, AttributeDescriptor, FieldMap, GeoCounts, ScalarValue,
    SparseVolumeDescriptor, Vector3, VolumeDescriptor,
};

use crate::config::NodestatConfig;
use crate::host::{NodeIdentity, NodeResolver, ReportSource};

/// Bounding box corners and center. Absent when the host omits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub minimum: Option<Vector3>,
    pub maximum: Option<Vector3>,
    pub center: Option<Vector3>,
}

/// Every decoded field of a node in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SopSummary {
    pub path: String,
    pub name: String,
    pub bounding_box: BoundingBox,
    pub memory_megabytes: Option<f64>,
    pub contained_nodes: Option<i64>,
    pub synchronized_with_definition: Option<bool>,
    pub last_cook_time: Option<f64>,
    pub total_cooks: Option<i64>,
    pub created_time: Option<NaiveDateTime>,
    pub modified_time: Option<NaiveDateTime>,
    pub version: ScalarValue,
    pub defined_by: ScalarValue,
    pub time_dependent: Option<bool>,
    pub geo_counts: GeoCounts,
    pub detail_attributes: Vec<AttributeDescriptor>,
    pub point_attributes: Vec<AttributeDescriptor>,
    pub vertex_attributes: Vec<AttributeDescriptor>,
    pub primitive_attributes: Vec<AttributeDescriptor>,
    pub volumes: Vec<VolumeDescriptor>,
    pub sparse_volumes: Vec<SparseVolumeDescriptor>,
}

/// Info report accessors for a geometry node.
#[derive(Debug, Clone)]
pub struct SopInfo {
    identity: NodeIdentity,
    report: ReportNode,
    config: NodestatConfig,
}

impl SopInfo {
    /// Check the node is geometry-producing, then capture one snapshot.
    ///
    /// # Errors
    /// [`Error::InvalidNode`] before any snapshot is taken if the node is not
    /// a geometry node; otherwise whatever the host's snapshot returns.
    pub fn new<S>(source: &S, config: NodestatConfig) -> Result<Self>
    where
        S: ReportSource + ?Sized,
    {
        let identity = source.identity();
        ensure_geometry(&identity)?;
        let report = source.snapshot()?;
        tracing::debug!(path = %identity.path, sections = report.branches.len(), "captured node report");
        Ok(SopInfo {
            identity,
            report,
            config,
        })
    }

    /// Wrap a report captured earlier, e.g. loaded from JSON.
    pub fn from_snapshot(
        identity: NodeIdentity,
        report: ReportNode,
        config: NodestatConfig,
    ) -> Result<Self> {
        ensure_geometry(&identity)?;
        Ok(SopInfo {
            identity,
            report,
            config,
        })
    }

    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    pub fn report(&self) -> &ReportNode {
        &self.report
    }

    pub fn config(&self) -> &NodestatConfig {
        &self.config
    }

    /// Key/value fields at `path`; empty when any section on it is absent.
    fn fields(&self, path: &[&str]) -> Result<FieldMap> {
        let Some((&last, _)) = path.split_last() else {
            return Ok(FieldMap::default());
        };
        match self.report.branch_at(path) {
            Ok(node) => FieldMap::from_section(last, node),
            Err(err) if err.is_expected() => Ok(FieldMap::empty(last)),
            Err(err) => Err(err),
        }
    }

    fn sop_fields(&self) -> Result<FieldMap> {
        self.fields(&[SOP_INFO])
    }

    fn general_fields(&self) -> Result<FieldMap> {
        self.fields(&[GENERAL_INFO])
    }

    /// The `SOP Info` section, or an empty stand-in.
    fn sop_section(&self) -> &ReportNode {
        static EMPTY: ReportNode = ReportNode {
            rows: Vec::new(),
            branches: std::collections::BTreeMap::new(),
        };
        self.report.try_branch(SOP_INFO).unwrap_or(&EMPTY)
    }

    // Bounding box

    pub fn bb_center(&self) -> Result<Option<Vector3>> {
        decode_vector3(self.sop_fields()?.raw(fields::CENTER))
    }

    pub fn bb_minimum(&self) -> Result<Option<Vector3>> {
        decode_vector3(self.sop_fields()?.raw(fields::MINIMUM))
    }

    pub fn bb_maximum(&self) -> Result<Option<Vector3>> {
        decode_vector3(self.sop_fields()?.raw(fields::MAXIMUM))
    }

    pub fn bounding_box(&self) -> Result<BoundingBox> {
        let sop = self.sop_fields()?;
        Ok(BoundingBox {
            minimum: decode_vector3(sop.raw(fields::MINIMUM))?,
            maximum: decode_vector3(sop.raw(fields::MAXIMUM))?,
            center: decode_vector3(sop.raw(fields::CENTER))?,
        })
    }

    // Memory

    /// The `Memory` field as coerced from the report.
    pub fn memory(&self) -> Result<ScalarValue> {
        self.sop_fields()?.coerce(fields::MEMORY)
    }

    /// The `Memory` field converted to megabytes.
    pub fn memory_megabytes(&self) -> Result<Option<f64>> {
        let sop = self.sop_fields()?;
        sop.text(fields::MEMORY)
            .map(|text| decode_megabytes(&text, &self.config.units))
            .transpose()
    }

    // General info

    pub fn contained_nodes(&self) -> Result<Option<i64>> {
        integer(&self.general_fields()?, fields::CONTAINED_NODES)
    }

    pub fn synchronized_with_definition(&self) -> Result<Option<bool>> {
        boolean(&self.general_fields()?, fields::SYNCHRONIZED_WITH_DEFINITION)
    }

    /// Duration of the last cook in seconds.
    ///
    /// # Errors
    /// [`Error::MissingField`] when the report has no cook time.
    pub fn last_cook_time(&self) -> Result<f64> {
        let general = self.general_fields()?;
        let text = general.require_text(fields::LAST_COOK_TIME)?;
        decode_seconds(&text, &self.config.units)
    }

    pub fn total_cooks(&self) -> Result<Option<i64>> {
        integer(&self.general_fields()?, fields::TOTAL_COOKS)
    }

    /// # Errors
    /// [`Error::MissingField`] when the report has no creation time.
    pub fn created_time(&self) -> Result<NaiveDateTime> {
        self.timestamp(fields::CREATED_TIME)
    }

    /// # Errors
    /// [`Error::MissingField`] when the report has no modification time.
    pub fn modified_time(&self) -> Result<NaiveDateTime> {
        self.timestamp(fields::MODIFIED_TIME)
    }

    fn timestamp(&self, key: &str) -> Result<NaiveDateTime> {
        let general = self.general_fields()?;
        let text = general.require_text(key)?;
        decode_date(&text, &self.config.date_format)
    }

    // Operator

    pub fn version(&self) -> Result<ScalarValue> {
        self.fields(&[GENERAL_INFO, OPERATOR_INFO])?
            .coerce(fields::VERSION)
    }

    pub fn defined_by(&self) -> Result<ScalarValue> {
        self.fields(&[GENERAL_INFO, SCRIPT_OPERATOR_INFO])?
            .coerce(fields::DEFINED_BY)
    }

    pub fn time_dependent(&self) -> Result<Option<bool>> {
        boolean(&self.fields(&[DEPENDENCY])?, fields::TIME_DEPENDENT)
    }

    // Geometry tables

    pub fn geo_counts(&self) -> Result<GeoCounts> {
        decode_counts(self.sop_section())
    }

    pub fn detail_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        attributes_in(self.sop_section(), sections::DETAIL_ATTRIBUTES)
    }

    pub fn point_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        attributes_in(self.sop_section(), sections::POINT_ATTRIBUTES)
    }

    pub fn vertex_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        attributes_in(self.sop_section(), sections::VERTEX_ATTRIBUTES)
    }

    pub fn primitive_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        attributes_in(self.sop_section(), sections::PRIMITIVE_ATTRIBUTES)
    }

    pub fn volumes(&self) -> Result<Vec<VolumeDescriptor>> {
        volumes_in(self.sop_section(), sections::VOLUMES)
    }

    pub fn sparse_volumes(&self) -> Result<Vec<SparseVolumeDescriptor>> {
        sparse_volumes_in(self.sop_section(), sections::SPARSE_VOLUMES)
    }

    // Subnetwork

    /// Resolve each recorded subnetwork output, in output-key order.
    ///
    /// Recorded paths are made relative to this node by dropping the first
    /// occurrence of its name and any leading `/`.
    ///
    /// Fails as a whole on the first unresolved output; no placeholder is
    /// returned in its position.
    ///
    /// # Errors
    /// [`Error::UnresolvedPath`] naming the first path the resolver rejects.
    pub fn subnetwork_outputs<R>(&self, resolver: &R) -> Result<Vec<R::Handle>>
    where
        R: NodeResolver + ?Sized,
    {
        let outputs = self.fields(&[SUBNETWORK_SOP_INFO])?;
        outputs
            .iter()
            .map(|(_, recorded)| {
                let relative = relative_output_path(&self.identity.name, &recorded.text());
                resolver
                    .resolve(&relative)
                    .ok_or(Error::UnresolvedPath { path: relative })
            })
            .collect()
    }

    /// Decode everything at once.
    ///
    /// Unlike the individual accessors, a missing cook time or timestamp is
    /// reported as `None` here rather than an error.
    pub fn summary(&self) -> Result<SopSummary> {
        let summary = SopSummary {
            path: self.identity.path.clone(),
            name: self.identity.name.clone(),
            bounding_box: self.bounding_box()?,
            memory_megabytes: self.memory_megabytes()?,
            contained_nodes: self.contained_nodes()?,
            synchronized_with_definition: self.synchronized_with_definition()?,
            last_cook_time: missing_as_none(self.last_cook_time())?,
            total_cooks: self.total_cooks()?,
            created_time: missing_as_none(self.created_time())?,
            modified_time: missing_as_none(self.modified_time())?,
            version: self.version()?,
            defined_by: self.defined_by()?,
            time_dependent: self.time_dependent()?,
            geo_counts: self.geo_counts()?,
            detail_attributes: self.detail_attributes()?,
            point_attributes: self.point_attributes()?,
            vertex_attributes: self.vertex_attributes()?,
            primitive_attributes: self.primitive_attributes()?,
            volumes: self.volumes()?,
            sparse_volumes: self.sparse_volumes()?,
        };
        tracing::debug!(path = %summary.path, "decoded node summary");
        Ok(summary)
    }
}

fn ensure_geometry(identity: &NodeIdentity) -> Result<()> {
    if identity.category.is_geometry() {
        Ok(())
    } else {
        Err(Error::InvalidNode {
            path: identity.path.clone(),
            category: identity.category.to_string(),
        })
    }
}

fn relative_output_path(node_name: &str, recorded: &str) -> String {
    recorded
        .replacen(node_name, "", 1)
        .trim_start_matches('/')
        .to_string()
}

fn missing_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::MissingField { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

fn typed<T>(
    map: &FieldMap,
    key: &str,
    expected: &str,
    pick: impl FnOnce(&ScalarValue) -> Option<T>,
) -> Result<Option<T>> {
    let value = map.coerce(key)?;
    if value.is_absent() {
        return Ok(None);
    }
    match pick(&value) {
        Some(v) => Ok(Some(v)),
        None => Err(Error::shape(
            format!("{} '{}'", map.section(), key),
            expected,
            value.kind(),
        )),
    }
}

fn integer(map: &FieldMap, key: &str) -> Result<Option<i64>> {
    typed(map, key, "an integer", ScalarValue::as_i64)
}

fn boolean(map: &FieldMap, key: &str) -> Result<Option<bool>> {
    typed(map, key, "Yes or No", ScalarValue::as_bool)
}
