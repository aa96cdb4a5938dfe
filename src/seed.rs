//! Built-in sample data, loaded on first run when `seed_sample_data` is set.

use crate::domain::{ScoreLine, Subject, SubjectScores, Task, TaskStatus, TaskUpdate, TestResult, TestType, Unit};
use crate::store::{TaskStore, TestRecordStore};
use chrono::NaiveDate;

/// score, average, deviation, rank
type Line = (f64, f64, f64, &'static str);

struct SampleTest {
    id: &'static str,
    date: (i32, u32, u32),
    name: &'static str,
    test_type: TestType,
    /// math, japanese, science, social
    subjects: [Line; 4],
    total4: Line,
}

const SAMPLE_ROUND: u32 = 14;

#[rustfmt::skip]
const SAMPLE_TESTS: &[SampleTest] = &[
    SampleTest { id: "t20251206", date: (2025, 12, 6), name: "カリ下13-14", test_type: TestType::Curriculum,
        subjects: [(46.0, 57.6, 42.2, "1665/2216"), (76.0, 73.6, 51.7, "1019/2216"), (34.0, 37.3, 45.4, "1537/2216"), (38.0, 40.9, 44.4, "1602/2216")],
        total4: (194.0, 209.6, 44.2, "1615/2216") },
    SampleTest { id: "t20251122", date: (2025, 11, 22), name: "カリ下11-12", test_type: TestType::Curriculum,
        subjects: [(46.0, 54.5, 44.8, "1416/2133"), (75.0, 65.9, 57.2, "488/2133"), (38.0, 41.6, 44.5, "1574/2133"), (46.0, 41.0, 58.8, "225/2133")],
        total4: (205.0, 203.2, 50.6, "1036/2133") },
    SampleTest { id: "t20251101", date: (2025, 11, 1), name: "カリ下8-9", test_type: TestType::Curriculum,
        subjects: [(69.0, 55.3, 58.5, "349/2281"), (77.0, 70.0, 55.8, "652/2281"), (50.0, 42.5, 62.7, "1/2281"), (38.0, 38.3, 49.3, "1140/2281")],
        total4: (234.0, 206.3, 60.1, "329/2281") },
    SampleTest { id: "t20251018", date: (2025, 10, 18), name: "カリ下6-7", test_type: TestType::Curriculum,
        subjects: [(90.0, 65.4, 67.1, "28/2329"), (75.0, 64.5, 57.6, "502/2329"), (40.0, 35.1, 56.2, "637/2329"), (48.0, 43.7, 58.0, "261/2329")],
        total4: (253.0, 208.9, 66.7, "80/2329") },
    SampleTest { id: "t20250927", date: (2025, 9, 27), name: "カリ下3-4", test_type: TestType::Curriculum,
        subjects: [(73.0, 62.6, 57.1, "514/2161"), (61.0, 71.1, 42.4, "1659/2161"), (36.0, 41.7, 41.2, "1770/2161"), (46.0, 40.9, 58.5, "250/2161")],
        total4: (216.0, 216.5, 49.7, "1108/2161") },
    SampleTest { id: "t20250913", date: (2025, 9, 13), name: "カリ下1-2", test_type: TestType::Curriculum,
        subjects: [(69.0, 67.0, 51.3, "907/2150"), (77.0, 69.6, 56.5, "530/2150"), (43.0, 41.3, 52.7, "862/2150"), (48.0, 44.0, 58.0, "221/2150")],
        total4: (237.0, 222.0, 56.4, "559/2150") },
    SampleTest { id: "t20250705", date: (2025, 7, 5), name: "カリ上18-19", test_type: TestType::Curriculum,
        subjects: [(74.0, 68.3, 53.9, "753/2185"), (88.0, 82.1, 54.7, "770/2185"), (38.0, 35.8, 52.9, "829/2185"), (40.0, 38.1, 53.0, "761/2185")],
        total4: (240.0, 224.5, 55.9, "622/2185") },
    SampleTest { id: "t20250621", date: (2025, 6, 21), name: "カリ上16-17", test_type: TestType::Curriculum,
        subjects: [(74.0, 65.0, 56.0, "535/2147"), (47.0, 66.6, 34.1, "1982/2147"), (36.0, 35.9, 50.0, "1085/2147"), (40.0, 39.6, 50.5, "993/2147")],
        total4: (197.0, 207.4, 45.9, "1417/2147") },
    SampleTest { id: "t20250531", date: (2025, 5, 31), name: "カリ上13-14", test_type: TestType::Curriculum,
        subjects: [(80.0, 61.7, 62.5, "156/2131"), (62.0, 59.6, 51.8, "899/2131"), (37.0, 37.9, 48.5, "1205/2131"), (46.0, 37.7, 62.2, "106/2131")],
        total4: (225.0, 197.0, 60.5, "277/2131") },
    SampleTest { id: "t20250517", date: (2025, 5, 17), name: "カリ上11-12", test_type: TestType::Curriculum,
        subjects: [(69.0, 60.3, 56.0, "534/2175"), (39.0, 63.8, 32.1, "2055/2175"), (41.0, 29.5, 65.2, "105/2175"), (32.0, 35.4, 44.7, "1462/2175")],
        total4: (181.0, 189.1, 47.0, "1344/2175") },
    SampleTest { id: "t20250419", date: (2025, 4, 19), name: "カリ上8-9", test_type: TestType::Curriculum,
        subjects: [(83.0, 61.9, 64.3, "178/2159"), (96.0, 78.2, 63.8, "83/2159"), (37.0, 36.7, 50.3, "1031/2159"), (48.0, 42.1, 59.5, "156/2159")],
        total4: (264.0, 219.1, 65.6, "84/2159") },
    SampleTest { id: "t20250322", date: (2025, 3, 22), name: "カリ上6-7", test_type: TestType::Curriculum,
        subjects: [(88.0, 70.8, 61.1, "295/2010"), (84.0, 63.7, 62.5, "183/2010"), (29.0, 31.9, 45.2, "1332/2010"), (46.0, 37.2, 63.2, "55/2010")],
        total4: (247.0, 203.8, 65.4, "102/2010") },
    SampleTest { id: "t20250301", date: (2025, 3, 1), name: "カリ上3-4", test_type: TestType::Curriculum,
        subjects: [(94.0, 75.5, 62.1, "166/1937"), (71.0, 70.1, 50.5, "986/1937"), (42.0, 37.1, 55.8, "538/1937"), (46.0, 40.2, 58.0, "261/1937")],
        total4: (253.0, 223.0, 58.9, "341/1937") },
    SampleTest { id: "t20250215", date: (2025, 2, 15), name: "カリ上1-2", test_type: TestType::Curriculum,
        subjects: [(88.0, 69.8, 61.1, "233/1934"), (88.0, 79.3, 56.5, "486/1934"), (47.0, 37.0, 64.2, "63/1934"), (50.0, 38.7, 65.4, "1/1934")],
        total4: (273.0, 224.9, 65.2, "46/1934") },
    SampleTest { id: "t20251109", date: (2025, 11, 9), name: "4年公開組分-07", test_type: TestType::Kumiwake,
        subjects: [(90.0, 97.1, 48.1, "6082/10342"), (75.0, 69.4, 52.3, "4080/10342"), (70.0, 62.9, 53.8, "3805/10069"), (87.0, 60.7, 61.4, "1279/10001")],
        total4: (322.0, 290.7, 53.4, "3844/10001") },
    SampleTest { id: "t20251005", date: (2025, 10, 5), name: "4年公開組分-06", test_type: TestType::Kumiwake,
        subjects: [(72.0, 90.9, 44.6, "7317/10413"), (98.0, 85.8, 54.8, "3473/10413"), (76.0, 77.8, 48.9, "6301/10152"), (81.0, 66.8, 55.9, "3457/10075")],
        total4: (327.0, 322.1, 50.5, "5210/10075") },
    SampleTest { id: "t20250831", date: (2025, 8, 31), name: "4年公開組分-05", test_type: TestType::Kumiwake,
        subjects: [(108.0, 102.9, 51.1, "4812/10431"), (95.0, 81.0, 55.1, "3397/10431"), (66.0, 58.3, 54.2, "3497/10172"), (84.0, 60.8, 59.2, "2048/10095")],
        total4: (353.0, 303.7, 55.0, "3370/10095") },
    SampleTest { id: "t20250712", date: (2025, 7, 12), name: "4年公開組分-04", test_type: TestType::Kumiwake,
        subjects: [(98.0, 111.1, 46.3, "6478/10008"), (92.0, 84.0, 53.1, "3945/10008"), (62.0, 65.1, 48.4, "5732/9754"), (73.0, 58.5, 56.8, "2624/9691")],
        total4: (325.0, 319.1, 50.6, "4922/9691") },
    SampleTest { id: "t20250426", date: (2025, 4, 26), name: "4年公開組分-02", test_type: TestType::Kumiwake,
        subjects: [(108.0, 104.3, 51.0, "4593/9951"), (95.0, 93.7, 50.5, "5057/9951"), (63.0, 62.5, 50.2, "5024/9702"), (50.0, 61.3, 44.7, "6766/9632")],
        total4: (316.0, 322.4, 49.2, "5367/9632") },
    SampleTest { id: "t20250308", date: (2025, 3, 8), name: "4年公開組分-01", test_type: TestType::Kumiwake,
        subjects: [(104.0, 111.4, 47.9, "5673/9334"), (81.0, 79.0, 50.7, "4463/9334"), (86.0, 69.7, 59.6, "1386/9112"), (77.0, 66.2, 55.7, "2859/9057")],
        total4: (348.0, 326.7, 52.5, "3946/9057") },
];

fn line((score, average, deviation, rank): Line) -> ScoreLine {
    ScoreLine::new(score, average, deviation).with_rank(rank)
}

fn sample_date((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

impl SampleTest {
    fn to_result(&self) -> Option<TestResult> {
        let [math, japanese, science, social] = self.subjects;
        Some(TestResult {
            id: self.id.to_string(),
            date: sample_date(self.date)?,
            name: self.name.to_string(),
            test_type: self.test_type,
            subjects: SubjectScores {
                math: line(math),
                japanese: line(japanese),
                science: line(science),
                social: line(social),
            },
            total4: line(self.total4),
        })
    }
}

/// Sample test history, newest entries first as they were recorded
pub fn sample_tests() -> TestRecordStore {
    TestRecordStore::new(SAMPLE_TESTS.iter().filter_map(SampleTest::to_result).collect())
}

/// Two math tasks of round 14: one finished with a committed session, one
/// in progress with time on the clock
pub fn sample_tasks() -> TaskStore {
    let (Some(unit), Some(created)) = (Unit::new(SAMPLE_ROUND), sample_date((2025, 5, 18))) else {
        return TaskStore::default();
    };

    let mut finished = Task::new(unit, Subject::Math, "計算", "①", created);
    finished.apply(TaskUpdate::SetDuration(900));
    finished.apply(TaskUpdate::SetMemo("全問正解！".to_string()));
    finished.commit_session(created);
    finished.apply(TaskUpdate::SetStatus(TaskStatus::Completed));

    let mut in_progress = Task::new(unit, Subject::Math, "予習シリーズ", "基本問題", created);
    in_progress.apply(TaskUpdate::SetStatus(TaskStatus::InProgress));
    in_progress.apply(TaskUpdate::SetDuration(1200));
    in_progress.apply(TaskUpdate::SetMemo("問3でつまづいた".to_string()));

    let mut store = TaskStore::new(vec![finished, in_progress]);
    store.select_unit(Some(unit));
    store
}
