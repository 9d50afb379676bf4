//! Ordered table definitions for every entity the service manages.

use crate::domain::model::{
    ColorSort, Entity, GraderMachineOutput, GradingCategory, Humidifier, MachineGrading,
    ManualGrading, ManualGradingSample, PeelingMachine, Piece, SizeVariation, Stock, WeightType,
    Worker,
};

/// Name and DDL of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub table: &'static str,
    pub create_table_sql: &'static str,
}

impl TableDef {
    pub fn of<E: Entity>() -> Self {
        Self {
            table: E::TABLE,
            create_table_sql: E::CREATE_TABLE,
        }
    }
}

/// All tables, ordered so that every table comes after the tables it references.
pub fn entity_tables() -> Vec<TableDef> {
    vec![
        TableDef::of::<WeightType>(),
        TableDef::of::<SizeVariation>(),
        TableDef::of::<Piece>(),
        TableDef::of::<GradingCategory>(),
        TableDef::of::<GraderMachineOutput>(),
        TableDef::of::<Worker>(),
        TableDef::of::<Stock>(),
        TableDef::of::<Humidifier>(),
        TableDef::of::<PeelingMachine>(),
        TableDef::of::<ColorSort>(),
        TableDef::of::<MachineGrading>(),
        TableDef::of::<ManualGrading>(),
        TableDef::of::<ManualGradingSample>(),
    ]
}
