use super::common::*;
use crate::pipeline::board::{partition, project, BoardView};
use crate::pipeline::domain::Stage;
use crate::pipeline::ledger::record_mark;
use crate::pipeline::roster::EvaluatorRoster;

#[test]
fn projection_orders_columns_and_excludes_terminal_candidates() {
    let mut screening = candidate("b-screening");
    screening.stage = Stage::Screening;
    let mut hired = candidate("b-hired");
    hired.stage = Stage::Hired;
    let mut rejected = candidate("b-rejected");
    rejected.stage = Stage::Rejected;
    let job = job_with_candidates(vec![candidate("b-omoed"), screening, hired, rejected]);

    let columns = project(&job);

    assert_eq!(columns.len(), 4);
    assert_eq!(
        columns.iter().map(|c| c.stage).collect::<Vec<_>>(),
        Stage::ordered().to_vec()
    );
    assert_eq!(columns[0].candidates.len(), 1);
    assert_eq!(columns[1].candidates.len(), 1);
    let boarded: usize = columns.iter().map(|c| c.candidates.len()).sum();
    assert_eq!(boarded, 2);
}

#[test]
fn partition_splits_candidates_by_completeness() {
    let roster = EvaluatorRoster::standard();
    let mut done = candidate("b-done");
    done.stage = Stage::Screening;
    record_mark(&mut done, Stage::Screening, "Lee Wei Song", Some(85), None).expect("mark");
    let mut pending = candidate("b-pending");
    pending.stage = Stage::Screening;

    let split = partition(&roster, &[done.clone(), pending.clone()], Stage::Screening);

    assert_eq!(split.completed.len(), 1);
    assert_eq!(split.completed[0].id, done.id);
    assert_eq!(split.in_progress.len(), 1);
    assert_eq!(split.in_progress[0].id, pending.id);
}

#[test]
fn board_view_never_partitions_the_omoed_column() {
    let roster = EvaluatorRoster::standard();
    let job = job_with_candidates(vec![candidate("b-1"), candidate("b-2")]);

    let view = BoardView::for_job(&roster, &job);

    let omoed = &view.columns[0];
    assert_eq!(omoed.stage, Stage::Omoed);
    assert!(!omoed.partitioned);
    assert_eq!(omoed.in_progress.len(), 2);
    assert!(omoed.completed.is_empty());
    assert!(view.columns[1..].iter().all(|column| column.partitioned));
}
