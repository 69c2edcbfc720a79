//! Commitment label set for the UltraPlonk verification key

/// Number of polynomial commitments in an UltraPlonk verification key
pub const NUM_COMMITMENTS: usize = 23;

/// A selector, permutation or lookup-table commitment label.
///
/// Declaration order is the canonical order: it drives the fixed-order
/// re-encoding and is independent of the order labels appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitmentLabel {
    Id1,
    Id2,
    Id3,
    Id4,
    Q1,
    Q2,
    Q3,
    Q4,
    QArithmetic,
    QAux,
    QC,
    QElliptic,
    QM,
    QSort,
    Sigma1,
    Sigma2,
    Sigma3,
    Sigma4,
    Table1,
    Table2,
    Table3,
    Table4,
    TableType,
}

impl CommitmentLabel {
    /// All labels in canonical order.
    pub const ALL: [CommitmentLabel; NUM_COMMITMENTS] = [
        CommitmentLabel::Id1,
        CommitmentLabel::Id2,
        CommitmentLabel::Id3,
        CommitmentLabel::Id4,
        CommitmentLabel::Q1,
        CommitmentLabel::Q2,
        CommitmentLabel::Q3,
        CommitmentLabel::Q4,
        CommitmentLabel::QArithmetic,
        CommitmentLabel::QAux,
        CommitmentLabel::QC,
        CommitmentLabel::QElliptic,
        CommitmentLabel::QM,
        CommitmentLabel::QSort,
        CommitmentLabel::Sigma1,
        CommitmentLabel::Sigma2,
        CommitmentLabel::Sigma3,
        CommitmentLabel::Sigma4,
        CommitmentLabel::Table1,
        CommitmentLabel::Table2,
        CommitmentLabel::Table3,
        CommitmentLabel::Table4,
        CommitmentLabel::TableType,
    ];

    /// The on-wire spelling of this label.
    pub fn as_str(self) -> &'static str {
        match self {
            CommitmentLabel::Id1 => "ID_1",
            CommitmentLabel::Id2 => "ID_2",
            CommitmentLabel::Id3 => "ID_3",
            CommitmentLabel::Id4 => "ID_4",
            CommitmentLabel::Q1 => "Q_1",
            CommitmentLabel::Q2 => "Q_2",
            CommitmentLabel::Q3 => "Q_3",
            CommitmentLabel::Q4 => "Q_4",
            CommitmentLabel::QArithmetic => "Q_ARITHMETIC",
            CommitmentLabel::QAux => "Q_AUX",
            CommitmentLabel::QC => "Q_C",
            CommitmentLabel::QElliptic => "Q_ELLIPTIC",
            CommitmentLabel::QM => "Q_M",
            CommitmentLabel::QSort => "Q_SORT",
            CommitmentLabel::Sigma1 => "SIGMA_1",
            CommitmentLabel::Sigma2 => "SIGMA_2",
            CommitmentLabel::Sigma3 => "SIGMA_3",
            CommitmentLabel::Sigma4 => "SIGMA_4",
            CommitmentLabel::Table1 => "TABLE_1",
            CommitmentLabel::Table2 => "TABLE_2",
            CommitmentLabel::Table3 => "TABLE_3",
            CommitmentLabel::Table4 => "TABLE_4",
            CommitmentLabel::TableType => "TABLE_TYPE",
        }
    }

    /// Position of this label in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse an on-wire label; `None` for non-members of the set.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "ID_1" => Some(CommitmentLabel::Id1),
            "ID_2" => Some(CommitmentLabel::Id2),
            "ID_3" => Some(CommitmentLabel::Id3),
            "ID_4" => Some(CommitmentLabel::Id4),
            "Q_1" => Some(CommitmentLabel::Q1),
            "Q_2" => Some(CommitmentLabel::Q2),
            "Q_3" => Some(CommitmentLabel::Q3),
            "Q_4" => Some(CommitmentLabel::Q4),
            "Q_ARITHMETIC" => Some(CommitmentLabel::QArithmetic),
            "Q_AUX" => Some(CommitmentLabel::QAux),
            "Q_C" => Some(CommitmentLabel::QC),
            "Q_ELLIPTIC" => Some(CommitmentLabel::QElliptic),
            "Q_M" => Some(CommitmentLabel::QM),
            "Q_SORT" => Some(CommitmentLabel::QSort),
            "SIGMA_1" => Some(CommitmentLabel::Sigma1),
            "SIGMA_2" => Some(CommitmentLabel::Sigma2),
            "SIGMA_3" => Some(CommitmentLabel::Sigma3),
            "SIGMA_4" => Some(CommitmentLabel::Sigma4),
            "TABLE_1" => Some(CommitmentLabel::Table1),
            "TABLE_2" => Some(CommitmentLabel::Table2),
            "TABLE_3" => Some(CommitmentLabel::Table3),
            "TABLE_4" => Some(CommitmentLabel::Table4),
            "TABLE_TYPE" => Some(CommitmentLabel::TableType),
            _ => None,
        }
    }
}
