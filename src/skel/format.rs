//! SKEL section schema.
//!
//! A SKEL document is a fixed sequence of sections. Each starts with a tag
//! token and a record count, followed by the records. Writers emit every
//! section in [`Section::ORDER`], reserved ones with a count of `0`.

/// Sub-tag introducing each branch inside the `CN` section.
pub const BRANCH_TAG: &str = "CNN";

/// What a section's declared count refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    /// Size of the original cloud.
    Original,
    /// Size of the sample set.
    Samples,
    /// Number of branches.
    Branches,
    /// Aggregate curve-point count, flattened branch-major.
    CurvePoints,
    /// Always written as zero.
    Reserved,
}

/// One section of a SKEL document, in on-disk order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// `ON`: original vertices (position, normal).
    Original,
    /// `SN`: sample vertices (position, normal).
    Samples,
    /// `CN`: branches, each `CNN count` then curve-point positions.
    Curves,
    /// `EN`: reserved edge list.
    Edges,
    /// `BN`: reserved branch-to-sample lists.
    BranchSamples,
    /// `S_onedge`: sample `is_fixed_sample`.
    FixedSample,
    /// `GroupID`: sample index, kept for older readers.
    GroupId,
    /// `SkelRadius`: curve-point radius.
    ///
    /// Only applied when the declared count is greater than one, so a
    /// single-point skeleton cannot carry a radius. A later revision
    /// should signal presence explicitly.
    SkelRadius,
    /// `Confidence_Sigma`: sample eigen confidence.
    Confidence,
    /// `SkelRadius2`: reserved legacy radius.
    SkelRadius2,
    /// `Alpha`: reserved legacy field.
    Alpha,
    /// `Sample_isVirtual`: sample `is_skel_virtual`.
    SampleVirtual,
    /// `Sample_isBranch`: sample `is_skel_branch`.
    SampleBranch,
    /// `Sample_radius`: placeholder, always zeros.
    SampleRadius,
    /// `Skel_isVirtual`: curve-point `is_virtual`.
    SkelVirtual,
    /// `Corresponding_sample_index`: curve-point sample back-reference.
    CorrespondingSample,
}

impl Section {
    /// All sections in the order they appear on disk.
    pub const ORDER: [Section; 16] = [
        Section::Original,
        Section::Samples,
        Section::Curves,
        Section::Edges,
        Section::BranchSamples,
        Section::FixedSample,
        Section::GroupId,
        Section::SkelRadius,
        Section::Confidence,
        Section::SkelRadius2,
        Section::Alpha,
        Section::SampleVirtual,
        Section::SampleBranch,
        Section::SampleRadius,
        Section::SkelVirtual,
        Section::CorrespondingSample,
    ];

    /// Tag token that opens the section.
    pub const fn tag(self) -> &'static str {
        match self {
            Section::Original => "ON",
            Section::Samples => "SN",
            Section::Curves => "CN",
            Section::Edges => "EN",
            Section::BranchSamples => "BN",
            Section::FixedSample => "S_onedge",
            Section::GroupId => "GroupID",
            Section::SkelRadius => "SkelRadius",
            Section::Confidence => "Confidence_Sigma",
            Section::SkelRadius2 => "SkelRadius2",
            Section::Alpha => "Alpha",
            Section::SampleVirtual => "Sample_isVirtual",
            Section::SampleBranch => "Sample_isBranch",
            Section::SampleRadius => "Sample_radius",
            Section::SkelVirtual => "Skel_isVirtual",
            Section::CorrespondingSample => "Corresponding_sample_index",
        }
    }

    /// Look a section up by its tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ORDER.iter().copied().find(|s| s.tag() == tag)
    }

    /// Collection the declared count is keyed to.
    pub const fn owner(self) -> Owner {
        match self {
            Section::Original => Owner::Original,
            Section::Samples
            | Section::FixedSample
            | Section::GroupId
            | Section::Confidence
            | Section::SampleVirtual
            | Section::SampleBranch
            | Section::SampleRadius => Owner::Samples,
            Section::Curves => Owner::Branches,
            Section::SkelRadius | Section::SkelVirtual | Section::CorrespondingSample => {
                Owner::CurvePoints
            }
            Section::Edges | Section::BranchSamples | Section::SkelRadius2 | Section::Alpha => {
                Owner::Reserved
            }
        }
    }

    /// Check if the section is reserved and always written empty.
    #[inline]
    pub const fn is_reserved(self) -> bool {
        matches!(self.owner(), Owner::Reserved)
    }

    /// Check if the section must be present. Sections after `CN` may be
    /// missing at the end of files from older producers.
    #[inline]
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Section::Original | Section::Samples | Section::Curves)
    }

    /// Separator written between tag and count.
    pub(crate) const fn header_separator(self) -> char {
        match self {
            Section::Confidence => '\t',
            _ => ' ',
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique_and_resolve() {
        for s in Section::ORDER {
            assert_eq!(Section::from_tag(s.tag()), Some(s));
        }
        assert_eq!(Section::from_tag(BRANCH_TAG), None);
        assert_eq!(Section::from_tag("bogus"), None);
    }

    #[test]
    fn test_reserved_sections() {
        let reserved: Vec<&str> = Section::ORDER
            .iter()
            .filter(|s| s.is_reserved())
            .map(|s| s.tag())
            .collect();
        assert_eq!(reserved, vec!["EN", "BN", "SkelRadius2", "Alpha"]);
    }

    #[test]
    fn test_owners() {
        assert_eq!(Section::Original.owner(), Owner::Original);
        assert_eq!(Section::Curves.owner(), Owner::Branches);
        assert_eq!(Section::Confidence.owner(), Owner::Samples);
        assert_eq!(Section::CorrespondingSample.owner(), Owner::CurvePoints);
        assert!(Section::Curves.is_mandatory());
        assert!(!Section::FixedSample.is_mandatory());
    }
}
