//! The loaded reference directory and address-to-legislator resolution.
//!
//! `Directory::from_csv` maps each table's columns to fields exactly once,
//! applies the cleaning rules, and indexes the district map by ZIP. After
//! that the directory is immutable; resolution never mutates or caches.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::csv::{Sheet, SheetError};
use crate::record::{clean_email, format_phone, placeholder_photo, Chamber, Legislator, Party};
use crate::zip::ZipCode;

/// One row of the ZIP-to-district map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRow {
    pub zip: ZipCode,
    pub senate_district: String,
    pub assembly_district: String,
    pub senator_first: String,
    pub senator_last: String,
    pub representative_first: String,
    pub representative_last: String,
}

/// The three reference tables, cleaned and indexed.
#[derive(Debug, Clone)]
pub struct Directory {
    senators: Vec<Legislator>,
    assembly: Vec<Legislator>,
    districts: Vec<DistrictRow>,
    by_zip: HashMap<ZipCode, usize>,
}

/// Error building a [`Directory`] from CSV text.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A table was not parseable CSV.
    #[error("{table} table is not a valid CSV sheet: {source}")]
    Sheet {
        table: &'static str,
        source: SheetError,
    },
    /// A table is missing a column the mapping step requires.
    #[error("{table} table is missing required column \"{column}\"")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Why an address could not be resolved to its two legislators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The address text contains no standalone five-digit ZIP.
    #[error("no five-digit ZIP code found in the address")]
    MissingZip,
    /// The ZIP has no row in the district map.
    #[error("ZIP code {0} is not in the Wisconsin district map")]
    UnresolvedZip(ZipCode),
    /// A district row names a person absent from the chamber roster.
    #[error("no {chamber} roster entry matches {name} (district {district})")]
    UnmatchedLegislator {
        chamber: Chamber,
        name: String,
        district: String,
    },
}

/// A successful lookup: always both legislators, never one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub senator: Legislator,
    pub representative: Legislator,
}

impl Directory {
    /// Build the directory from the three CSV sources.
    ///
    /// Roster rows missing a first name, last name, or email cell are
    /// dropped with a warning; district rows missing their ZIP or either
    /// district number likewise. A duplicate ZIP keeps the first row seen.
    ///
    /// # Errors
    /// Returns [`DirectoryError`] if any table fails to parse or lacks a
    /// required column. There is no partial success.
    pub fn from_csv(
        senators: &str,
        assembly: &str,
        districts: &str,
    ) -> Result<Self, DirectoryError> {
        let senators = parse_roster(senators, "senate", Chamber::Senate)?;
        let assembly = parse_roster(assembly, "assembly", Chamber::Assembly)?;
        let districts = parse_districts(districts)?;

        let mut by_zip = HashMap::with_capacity(districts.len());
        for (idx, row) in districts.iter().enumerate() {
            match by_zip.entry(row.zip.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(zip = %row.zip, "duplicate ZIP in district map, keeping first row");
                }
            }
        }

        Ok(Self {
            senators,
            assembly,
            districts,
            by_zip,
        })
    }

    #[must_use]
    pub fn senators(&self) -> &[Legislator] {
        &self.senators
    }

    #[must_use]
    pub fn assembly_members(&self) -> &[Legislator] {
        &self.assembly
    }

    #[must_use]
    pub fn districts(&self) -> &[DistrictRow] {
        &self.districts
    }

    /// Resolve a constituent address to its senator and representative.
    ///
    /// # Errors
    /// Returns [`ResolveError`] when the address has no ZIP, the ZIP is
    /// unmapped, or a named legislator is missing from the roster.
    pub fn resolve(&self, address: &str) -> Result<Resolution, ResolveError> {
        let zip = ZipCode::extract(address).ok_or(ResolveError::MissingZip)?;
        self.resolve_zip(&zip)
    }

    /// Resolve an already-extracted ZIP code.
    ///
    /// # Errors
    /// Returns [`ResolveError`] when the ZIP is unmapped or a named
    /// legislator is missing from the roster.
    pub fn resolve_zip(&self, zip: &ZipCode) -> Result<Resolution, ResolveError> {
        let row = self
            .by_zip
            .get(zip)
            .and_then(|&idx| self.districts.get(idx))
            .ok_or_else(|| ResolveError::UnresolvedZip(zip.clone()))?;

        let senator = match_member(
            &self.senators,
            &row.senator_first,
            &row.senator_last,
            &row.senate_district,
        )
        .ok_or_else(|| unmatched(Chamber::Senate, &row.senator_first, &row.senator_last, &row.senate_district))?;

        let representative = match_member(
            &self.assembly,
            &row.representative_first,
            &row.representative_last,
            &row.assembly_district,
        )
        .ok_or_else(|| {
            unmatched(
                Chamber::Assembly,
                &row.representative_first,
                &row.representative_last,
                &row.assembly_district,
            )
        })?;

        Ok(Resolution {
            senator: senator.clone(),
            representative: representative.clone(),
        })
    }
}

fn unmatched(chamber: Chamber, first: &str, last: &str, district: &str) -> ResolveError {
    ResolveError::UnmatchedLegislator {
        chamber,
        name: format!("{first} {last}"),
        district: district.to_string(),
    }
}

/// Exact name-pair match within one chamber's roster.
///
/// When two members share a name, the district row's district number breaks
/// the tie; if that still leaves zero or several candidates the match fails
/// rather than guessing.
fn match_member<'a>(
    table: &'a [Legislator],
    first: &str,
    last: &str,
    district: &str,
) -> Option<&'a Legislator> {
    let mut matches = table
        .iter()
        .filter(|member| member.first_name == first && member.last_name == last);

    let first_match = matches.next()?;
    let Some(second_match) = matches.next() else {
        return Some(first_match);
    };

    // shared name: the mapping row's district number decides
    let mut narrowed = [first_match, second_match]
        .into_iter()
        .chain(matches)
        .filter(|member| member.district == district);
    let candidate = narrowed.next()?;
    if narrowed.next().is_some() {
        return None;
    }
    Some(candidate)
}

fn require_column(
    sheet: &Sheet,
    table: &'static str,
    column: &'static str,
) -> Result<usize, DirectoryError> {
    sheet
        .column(column)
        .ok_or(DirectoryError::MissingColumn { table, column })
}

fn parse_roster(
    text: &str,
    table: &'static str,
    chamber: Chamber,
) -> Result<Vec<Legislator>, DirectoryError> {
    let sheet = Sheet::parse(text).map_err(|source| DirectoryError::Sheet { table, source })?;

    let first_col = require_column(&sheet, table, "First Name")?;
    let last_col = require_column(&sheet, table, "Last Name")?;
    let district_col = require_column(&sheet, table, "District")?;
    let email_col = require_column(&sheet, table, "Email")?;
    // Party, Photo and Phone are tolerated as absent columns; the Chamber
    // column is ignored because the source file decides the chamber.
    let party_col = sheet.column("Party");
    let photo_col = sheet.column("Photo");
    let phone_col = sheet.column("Phone");

    let mut members = Vec::with_capacity(sheet.len());
    for (line, row) in sheet.rows().enumerate() {
        let first_name = row.get(first_col);
        let last_name = row.get(last_col);
        let raw_email = row.get(email_col);
        if first_name.is_empty() || last_name.is_empty() || raw_email.is_empty() {
            tracing::warn!(table, line, "dropping roster row with missing name or email");
            continue;
        }

        let party = Party::parse(party_col.map_or("", |col| row.get(col)));
        let raw_photo = photo_col.map_or("", |col| row.get(col));
        let photo = if raw_photo.is_empty() {
            placeholder_photo(first_name, last_name, &party)
        } else {
            raw_photo.to_string()
        };

        members.push(Legislator {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            party,
            chamber,
            district: row.get(district_col).to_string(),
            email: clean_email(raw_email),
            phone: format_phone(phone_col.map_or("", |col| row.get(col))),
            photo,
        });
    }

    Ok(members)
}

fn parse_districts(text: &str) -> Result<Vec<DistrictRow>, DirectoryError> {
    const TABLE: &str = "district map";

    let sheet = Sheet::parse(text).map_err(|source| DirectoryError::Sheet {
        table: TABLE,
        source,
    })?;

    let zip_col = require_column(&sheet, TABLE, "Zip Code")?;
    let senate_col = require_column(&sheet, TABLE, "Senate District")?;
    let assembly_col = require_column(&sheet, TABLE, "Assembly District")?;
    let sen_first_col = require_column(&sheet, TABLE, "Senator First Name")?;
    let sen_last_col = require_column(&sheet, TABLE, "Senator Last Name")?;
    let rep_first_col = require_column(&sheet, TABLE, "Representative First Name")?;
    let rep_last_col = require_column(&sheet, TABLE, "Representative Last Name")?;

    let mut rows = Vec::with_capacity(sheet.len());
    for (line, row) in sheet.rows().enumerate() {
        let raw_zip = row.get(zip_col);
        let senate_district = row.get(senate_col);
        let assembly_district = row.get(assembly_col);
        if raw_zip.is_empty() || senate_district.is_empty() || assembly_district.is_empty() {
            tracing::warn!(line, "dropping district row with missing ZIP or district");
            continue;
        }
        let zip = match ZipCode::from_digits(raw_zip) {
            Ok(zip) => zip,
            Err(err) => {
                tracing::warn!(line, raw_zip, %err, "dropping district row with unusable ZIP");
                continue;
            }
        };

        rows.push(DistrictRow {
            zip,
            senate_district: senate_district.to_string(),
            assembly_district: assembly_district.to_string(),
            senator_first: row.get(sen_first_col).to_string(),
            senator_last: row.get(sen_last_col).to_string(),
            representative_first: row.get(rep_first_col).to_string(),
            representative_last: row.get(rep_last_col).to_string(),
        });
    }

    Ok(rows)
}
