use crate::phenotype::Phenotype;

/// Scores an individual. Higher is better.
pub trait Challenge<Pheno: Phenotype> {
    fn score(&self, phenotype: &Pheno) -> f64;
}
