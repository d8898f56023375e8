use super::{Decomposer, ModelIterator, Semantics};
use crate::{
    adf::{AbstractDialecticalFramework, Interpretation, LabelType, Prefix},
    encodings::EncodingContext,
    sat::SatSolverFactory,
};
use anyhow::{anyhow, Result};
use log::{debug, info};

/// The entry point to compute the models of an ADF.
///
/// The reasoner builds the encoding context of the ADF once; it is then shared by all the searches.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet};
/// # use crustadf::sat::DefaultSatSolverFactory;
/// # use crustadf::solvers::{AdfReasoner, Decomposer, Semantics};
/// let adf = AbstractDialecticalFramework::new_with_conditions(
///     ArgumentSet::new_with_labels(&["a", "b"]),
///     vec![
///         AcceptanceCondition::neg(AcceptanceCondition::atom(1)),
///         AcceptanceCondition::neg(AcceptanceCondition::atom(0)),
///     ],
/// ).unwrap();
/// let factory = DefaultSatSolverFactory;
/// let reasoner = AdfReasoner::new(&adf, &factory);
/// assert_eq!(3, reasoner.models(Semantics::Admissible).unwrap().count());
/// let models = reasoner
///     .models_parallel(Semantics::Admissible, Decomposer::MostBipolarParents, 2, 3, |_| true)
///     .unwrap();
/// assert_eq!(3, models.len());
/// ```
pub struct AdfReasoner<'a, T>
where
    T: LabelType,
{
    adf: &'a AbstractDialecticalFramework<T>,
    context: EncodingContext,
    solver_factory: &'a dyn SatSolverFactory,
}

impl<'a, T> AdfReasoner<'a, T>
where
    T: LabelType,
{
    /// Builds a new reasoner for an ADF, using the provided factory to create its SAT sessions.
    pub fn new(
        adf: &'a AbstractDialecticalFramework<T>,
        solver_factory: &'a dyn SatSolverFactory,
    ) -> Self {
        info!(
            "building the encoding of an ADF with {} arguments and {} links",
            adf.n_arguments(),
            adf.n_links()
        );
        Self {
            adf,
            context: EncodingContext::new(adf),
            solver_factory,
        }
    }

    /// Returns the encoding context shared by the searches of this reasoner.
    pub fn context(&self) -> &EncodingContext {
        &self.context
    }

    /// Returns an iterator over the models of the ADF under the semantics.
    pub fn models(&self, semantics: Semantics) -> Result<ModelIterator<'_, T>> {
        self.models_with_prefix(semantics, Prefix::default())
    }

    /// Returns an iterator over the models of the ADF under the semantics that agree with the prefix.
    pub fn models_with_prefix(
        &self,
        semantics: Semantics,
        prefix: Prefix,
    ) -> Result<ModelIterator<'_, T>> {
        ModelIterator::new(
            self.adf,
            &self.context,
            semantics,
            self.solver_factory,
            prefix,
        )
    }

    /// Computes the models of the ADF under the semantics with several threads.
    ///
    /// The search is split into prefixes by the decomposer; the prefixes are handled by at most `parallelism` workers.
    /// Each model is given to the `on_model` callback as soon as it is found, in the calling thread;
    /// the search stops when the callback returns `false`.
    /// The models that were given to the callback are returned.
    pub fn models_parallel<F>(
        &self,
        semantics: Semantics,
        decomposer: Decomposer,
        parallelism: usize,
        desired_prefixes: usize,
        mut on_model: F,
    ) -> Result<Vec<Interpretation>>
    where
        F: FnMut(&Interpretation) -> bool,
    {
        let prefixes = decomposer.decompose(self.adf, desired_prefixes, semantics.is_two_valued());
        let n_workers = usize::max(1, usize::min(parallelism, prefixes.len()));
        info!(
            "computing {} models with {} prefixes and {} workers",
            semantics.as_ref(),
            prefixes.len(),
            n_workers
        );
        let (job_sender, job_receiver) = crossbeam_channel::unbounded::<Prefix>();
        prefixes
            .into_iter()
            .try_for_each(|p| job_sender.send(p))
            .map_err(|_| anyhow!("cannot dispatch prefixes"))?;
        drop(job_sender);
        let (result_sender, result_receiver) =
            crossbeam_channel::unbounded::<Result<Interpretation>>();
        let (stop_sender, stop_receiver) = crossbeam_channel::bounded::<()>(0);
        std::thread::scope(|scope| {
            for worker_id in 0..n_workers {
                let job_receiver = job_receiver.clone();
                let result_sender = result_sender.clone();
                let stop_receiver = stop_receiver.clone();
                scope.spawn(move || {
                    self.run_worker(worker_id, semantics, job_receiver, result_sender, stop_receiver)
                });
            }
            drop(result_sender);
            let mut models = vec![];
            for result in result_receiver {
                let model = result?;
                let go_on = on_model(&model);
                models.push(model);
                if !go_on {
                    break;
                }
            }
            drop(stop_sender);
            Ok(models)
        })
    }

    fn run_worker(
        &self,
        worker_id: usize,
        semantics: Semantics,
        jobs: crossbeam_channel::Receiver<Prefix>,
        results: crossbeam_channel::Sender<Result<Interpretation>>,
        stop: crossbeam_channel::Receiver<()>,
    ) {
        for prefix in jobs.iter() {
            if is_stopped(&stop) {
                return;
            }
            debug!(
                "worker {} starts prefix {}",
                worker_id,
                display_prefix(&prefix)
            );
            let iterator = match self.models_with_prefix(semantics, prefix) {
                Ok(it) => it,
                Err(e) => {
                    let _ = results.send(Err(e));
                    return;
                }
            };
            for model in iterator {
                let failed = model.is_err();
                if results.send(model).is_err() || failed || is_stopped(&stop) {
                    return;
                }
            }
            debug!("worker {} finished its prefix", worker_id);
        }
    }
}

// The stop channel carries no message; it is disconnected when the workers must stop.
fn is_stopped(stop: &crossbeam_channel::Receiver<()>) -> bool {
    matches!(
        stop.try_recv(),
        Err(crossbeam_channel::TryRecvError::Disconnected)
    )
}

fn display_prefix(prefix: &Prefix) -> String {
    prefix
        .assignments()
        .iter()
        .map(|(a, v)| format!("{}:{}", a, v.as_ref()))
        .collect::<Vec<String>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::{AcceptanceCondition as AC, ArgumentSet},
        error::ReasoningError,
        sat::{DefaultSatSolverFactory, UnknownResultSatSolverFactory},
    };
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn adf() -> AbstractDialecticalFramework<&'static str> {
        AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c", "d", "e"]),
            vec![
                AC::neg(AC::atom(1)),
                AC::neg(AC::atom(0)),
                AC::disj(vec![AC::atom(0), AC::neg(AC::atom(3))]),
                AC::neg(AC::atom(2)),
                AC::xor(AC::atom(3), AC::atom(4)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let adf = adf();
        let factory = DefaultSatSolverFactory;
        let reasoner = AdfReasoner::new(&adf, &factory);
        for semantics in Semantics::iter() {
            let sequential = reasoner
                .models(semantics)
                .unwrap()
                .collect::<Result<HashSet<Interpretation>>>()
                .unwrap();
            for decomposer in [
                Decomposer::MostBipolarParents,
                Decomposer::MostComplexAcceptanceCondition,
                Decomposer::Random(1),
            ] {
                let parallel = reasoner
                    .models_parallel(semantics, decomposer, 3, 9, |_| true)
                    .unwrap();
                let n = parallel.len();
                let parallel = parallel.into_iter().collect::<HashSet<Interpretation>>();
                assert_eq!(n, parallel.len(), "duplicates for {}", semantics.as_ref());
                assert_eq!(sequential, parallel, "mismatch for {}", semantics.as_ref());
            }
        }
    }

    #[test]
    fn test_parallel_stops_on_request() {
        let adf = adf();
        let factory = DefaultSatSolverFactory;
        let reasoner = AdfReasoner::new(&adf, &factory);
        let models = reasoner
            .models_parallel(Semantics::ConflictFree, Decomposer::MostBipolarParents, 2, 9, |_| false)
            .unwrap();
        assert_eq!(1, models.len());
    }

    #[test]
    fn test_single_worker() {
        let adf = adf();
        let factory = DefaultSatSolverFactory;
        let reasoner = AdfReasoner::new(&adf, &factory);
        let n = reasoner.models(Semantics::Complete).unwrap().count();
        let models = reasoner
            .models_parallel(Semantics::Complete, Decomposer::Random(3), 1, 1, |_| true)
            .unwrap();
        assert_eq!(n, models.len());
    }

    fn assert_solver_failure(err: &anyhow::Error) {
        assert!(matches!(
            err.downcast_ref::<ReasoningError>(),
            Some(ReasoningError::SolverFailure(_))
        ));
    }

    #[test]
    fn test_sequential_solver_failure() {
        let adf = adf();
        let factory = UnknownResultSatSolverFactory;
        let reasoner = AdfReasoner::new(&adf, &factory);
        let mut models = reasoner.models(Semantics::ConflictFree).unwrap();
        assert_solver_failure(&models.next().unwrap().unwrap_err());
        assert!(models.next().is_none());
    }

    #[test]
    fn test_parallel_solver_failure() {
        let adf = adf();
        let factory = UnknownResultSatSolverFactory;
        let reasoner = AdfReasoner::new(&adf, &factory);
        for semantics in [Semantics::ConflictFree, Semantics::Stable] {
            let err = reasoner
                .models_parallel(semantics, Decomposer::MostBipolarParents, 3, 9, |_| true)
                .unwrap_err();
            assert_solver_failure(&err);
        }
    }
}
