//! Question Builder: spreadsheet rows -> multiple-choice questions

use super::construction::SheetSpec;
use super::row::{RowRef, Sheet, SheetRow};
use crate::config::CorpusConfig;
use crate::core::error::DomainError;
use crate::core::question::{QuestionKind, QuestionRecord, option_letter};
use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;

/// Builds question records for the sheets described by a [`CorpusConfig`]
///
/// For every sheet the output order is: all phrase questions, then all
/// sentence questions, then (when the sheet has them) all meaning questions.
/// Ids restart at 1 for every kind.
pub struct QuestionBuilder<'a> {
    config: &'a CorpusConfig,
}

impl<'a> QuestionBuilder<'a> {
    pub fn new(config: &'a CorpusConfig) -> Self {
        Self { config }
    }

    /// Build the questions of every sheet, in sheet order
    pub fn build_all<R: Rng + ?Sized>(
        &self,
        sheets: &[Sheet],
        rng: &mut R,
    ) -> Result<Vec<QuestionRecord>, DomainError> {
        let mut questions = Vec::new();
        for sheet in sheets {
            questions.extend(self.build_sheet(sheet, rng)?);
        }
        Ok(questions)
    }

    /// Build the questions of one sheet
    pub fn build_sheet<R: Rng + ?Sized>(
        &self,
        sheet: &Sheet,
        rng: &mut R,
    ) -> Result<Vec<QuestionRecord>, DomainError> {
        let spec = self
            .config
            .sheet(&sheet.name)
            .ok_or_else(|| DomainError::UnknownSheet(sheet.name.clone()))?;

        let mut questions = Vec::with_capacity(sheet.rows.len() * 3);
        for (index, row) in sheet.rows.iter().enumerate() {
            questions.push(self.phrase_question(spec, row, index, rng)?);
        }
        for (index, row) in sheet.rows.iter().enumerate() {
            questions.push(self.sentence_question(spec, row, index, rng)?);
        }
        if spec.with_meaning {
            for (index, row) in sheet.rows.iter().enumerate() {
                questions.push(self.meaning_question(spec, row, index, rng)?);
            }
        }
        Ok(questions)
    }

    fn phrase_question<R: Rng + ?Sized>(
        &self,
        spec: &SheetSpec,
        row: &SheetRow,
        index: usize,
        rng: &mut R,
    ) -> Result<QuestionRecord, DomainError> {
        let at = RowRef {
            sheet: &spec.name,
            index,
        };
        let source = row.text(at, self.config.phrase_source(spec.construction))?;
        let question = self.config.templates.phrase_question(&source);
        let pairs = self.option_pairs(row, at, &self.config.phrase_options(spec.construction))?;
        self.assemble(spec, row, at, question, pairs, QuestionKind::Phrase, rng)
    }

    fn sentence_question<R: Rng + ?Sized>(
        &self,
        spec: &SheetSpec,
        row: &SheetRow,
        index: usize,
        rng: &mut R,
    ) -> Result<QuestionRecord, DomainError> {
        let at = RowRef {
            sheet: &spec.name,
            index,
        };
        let question = self.config.templates.sentence.clone();
        let pairs = self.option_pairs(row, at, &self.config.sentence_options(spec.construction))?;
        self.assemble(spec, row, at, question, pairs, QuestionKind::Sentence, rng)
    }

    fn meaning_question<R: Rng + ?Sized>(
        &self,
        spec: &SheetSpec,
        row: &SheetRow,
        index: usize,
        rng: &mut R,
    ) -> Result<QuestionRecord, DomainError> {
        let at = RowRef {
            sheet: &spec.name,
            index,
        };
        let origin = row.text(at, &self.config.columns.origin_form)?;
        let question = self.config.templates.meaning_question(&origin);
        let pairs = self.option_pairs(row, at, &self.config.meaning_options())?;
        self.assemble(spec, row, at, question, pairs, QuestionKind::Meaning, rng)
    }

    fn option_pairs(
        &self,
        row: &SheetRow,
        at: RowRef<'_>,
        columns: &[&str],
    ) -> Result<Vec<(String, bool)>, DomainError> {
        columns
            .iter()
            .map(|column| {
                let text = row.text(at, column)?;
                let judge = row.judge(at, &self.config.judge_column(column))?;
                Ok((text, judge))
            })
            .collect()
    }

    /// Shuffle the options, append the sentinel and assign letters
    #[allow(clippy::too_many_arguments)]
    fn assemble<R: Rng + ?Sized>(
        &self,
        spec: &SheetSpec,
        row: &SheetRow,
        at: RowRef<'_>,
        question: String,
        mut pairs: Vec<(String, bool)>,
        kind: QuestionKind,
        rng: &mut R,
    ) -> Result<QuestionRecord, DomainError> {
        pairs.shuffle(rng);
        let none_apply = pairs.iter().all(|(_, judge)| !judge);
        pairs.push((self.config.templates.none_of_the_above.clone(), none_apply));

        let mut options = IndexMap::with_capacity(pairs.len());
        let mut answer = Vec::new();
        for (index, (text, judge)) in pairs.into_iter().enumerate() {
            let letter = option_letter(index).ok_or(DomainError::TooManyOptions(index + 1))?;
            if judge {
                answer.push(letter);
            }
            options.insert(letter, text);
        }

        let mut question_info = IndexMap::new();
        for (key, column) in self.config.info_columns() {
            let value = row.value(at, column)?;
            question_info.insert(key.to_string(), value.clone());
        }

        Ok(QuestionRecord {
            domain: spec.name.clone(),
            id: at.id()?,
            question,
            options,
            answer,
            kind,
            question_info,
        })
    }
}
