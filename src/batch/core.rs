//! # 배치 실행 단위
//!
//! Spring Batch의 청크 지향 처리와 태스클릿을 async trait으로 표현합니다.
//!
//! | Spring Batch | 이 모듈 |
//! |--------------|---------|
//! | `ItemReader<T>` | [`ItemReader`] (`None` = 데이터 끝) |
//! | `ItemProcessor<I, O>` | [`ItemProcessor`] (`None` = 필터) |
//! | `ItemWriter<O>` | [`ItemWriter`] |
//! | `Tasklet` + `RepeatStatus` | [`Tasklet`] + [`RepeatStatus`] |
//! | `StepExecution` | [`StepExecution`] |
//!
//! 청크 처리 순서:
//!
//! ```text
//! read × chunk_size ──► process (필터 제외) ──► write(chunk) ──► commit
//!        ▲                                                        │
//!        └──────────────────── 데이터가 남아 있으면 반복 ◄─────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Starting,
    Started,
    Completed,
    Failed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Starting => "STARTING",
            BatchStatus::Started => "STARTED",
            BatchStatus::Completed => "COMPLETED",
            BatchStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatStatus {
    Finished,
    Continuable,
}

/// 스텝 한 번의 실행 기록
#[derive(Debug, Clone)]
pub struct StepExecution {
    pub step_name: String,
    pub status: BatchStatus,
    pub read_count: usize,
    pub write_count: usize,
    pub filter_count: usize,
    pub commit_count: usize,
    pub exit_description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub failure: Option<String>,
}

impl StepExecution {
    pub fn start(step_name: &str) -> Self {
        Self {
            step_name: step_name.to_string(),
            status: BatchStatus::Started,
            read_count: 0,
            write_count: 0,
            filter_count: 0,
            commit_count: 0,
            exit_description: String::new(),
            start_time: Utc::now(),
            end_time: None,
            failure: None,
        }
    }

    pub fn complete(&mut self) {
        self.status = BatchStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn fail(&mut self, message: String) {
        log::error!("❌ Step {} failed: {}", self.step_name, message);
        self.status = BatchStatus::Failed;
        self.exit_description = message.clone();
        self.failure = Some(message);
        self.end_time = Some(Utc::now());
    }
}

#[async_trait]
pub trait ItemReader<T>: Send {
    async fn read(&mut self) -> AppResult<Option<T>>;
}

#[async_trait]
pub trait ItemProcessor<I, O>: Send + Sync {
    async fn process(&self, item: I) -> AppResult<Option<O>>;
}

#[async_trait]
pub trait ItemWriter<O>: Send + Sync {
    async fn write(&self, chunk: Vec<O>) -> AppResult<()>;
}

#[async_trait]
pub trait Tasklet: Send + Sync {
    /// `contribution`에 카운트와 종료 설명을 기록할 수 있습니다.
    async fn execute(&self, contribution: &mut StepExecution) -> AppResult<RepeatStatus>;
}

#[async_trait]
pub trait Step: Send + Sync {
    fn name(&self) -> &str;

    /// 실패도 `StepExecution`에 기록하여 반환합니다.
    async fn execute(&self) -> StepExecution;
}

type ReaderFactory<I> = Box<dyn Fn() -> Box<dyn ItemReader<I>> + Send + Sync>;

/// 청크 지향 스텝
///
/// 실행할 때마다 `reader_factory`로 새 리더를 만듭니다.
pub struct ChunkStep<I, O> {
    name: String,
    chunk_size: usize,
    reader_factory: ReaderFactory<I>,
    processor: Arc<dyn ItemProcessor<I, O>>,
    writer: Arc<dyn ItemWriter<O>>,
}

impl<I, O> ChunkStep<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new(
        name: &str,
        chunk_size: usize,
        reader_factory: ReaderFactory<I>,
        processor: Arc<dyn ItemProcessor<I, O>>,
        writer: Arc<dyn ItemWriter<O>>,
    ) -> Self {
        Self {
            name: name.to_string(),
            chunk_size: chunk_size.max(1),
            reader_factory,
            processor,
            writer,
        }
    }

    async fn run_chunks(&self, execution: &mut StepExecution) -> AppResult<()> {
        let mut reader = (self.reader_factory)();

        loop {
            let mut items = Vec::with_capacity(self.chunk_size);
            let mut exhausted = false;

            while items.len() < self.chunk_size {
                match reader.read().await? {
                    Some(item) => items.push(item),
                    None => {
                        exhausted = true;
                        break;
                    }
                }
            }

            if items.is_empty() {
                return Ok(());
            }

            execution.read_count += items.len();

            let mut outputs = Vec::with_capacity(items.len());
            for item in items {
                match self.processor.process(item).await? {
                    Some(output) => outputs.push(output),
                    None => execution.filter_count += 1,
                }
            }

            let written = outputs.len();
            if written > 0 {
                self.writer.write(outputs).await?;
            }

            execution.write_count += written;
            execution.commit_count += 1;

            if exhausted {
                return Ok(());
            }
        }
    }
}

#[async_trait]
impl<I, O> Step for ChunkStep<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> StepExecution {
        let mut execution = StepExecution::start(&self.name);

        match self.run_chunks(&mut execution).await {
            Ok(()) => execution.complete(),
            Err(e) => execution.fail(e.to_string()),
        }

        execution
    }
}

/// 태스클릿이 `Finished`를 반환할 때까지 반복하는 스텝
pub struct TaskletStep {
    name: String,
    tasklet: Arc<dyn Tasklet>,
}

impl TaskletStep {
    pub fn new(name: &str, tasklet: Arc<dyn Tasklet>) -> Self {
        Self {
            name: name.to_string(),
            tasklet,
        }
    }
}

#[async_trait]
impl Step for TaskletStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> StepExecution {
        let mut execution = StepExecution::start(&self.name);

        loop {
            match self.tasklet.execute(&mut execution).await {
                Ok(RepeatStatus::Finished) => {
                    execution.commit_count += 1;
                    execution.complete();
                    break;
                }
                Ok(RepeatStatus::Continuable) => execution.commit_count += 1,
                Err(e) => {
                    execution.fail(e.to_string());
                    break;
                }
            }
        }

        execution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::AppError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct VecReader(std::vec::IntoIter<i32>);

    #[async_trait]
    impl ItemReader<i32> for VecReader {
        async fn read(&mut self) -> AppResult<Option<i32>> {
            Ok(self.0.next())
        }
    }

    /// 짝수만 통과시키고 10배로 만듭니다. 음수는 오류.
    struct EvenTimesTen;

    #[async_trait]
    impl ItemProcessor<i32, i32> for EvenTimesTen {
        async fn process(&self, item: i32) -> AppResult<Option<i32>> {
            if item < 0 {
                return Err(AppError::InternalError(format!("negative item {}", item)));
            }
            Ok((item % 2 == 0).then_some(item * 10))
        }
    }

    #[derive(Default)]
    struct CollectingWriter {
        chunks: Mutex<Vec<Vec<i32>>>,
    }

    #[async_trait]
    impl ItemWriter<i32> for CollectingWriter {
        async fn write(&self, chunk: Vec<i32>) -> AppResult<()> {
            self.chunks.lock().unwrap().push(chunk);
            Ok(())
        }
    }

    fn step(data: Vec<i32>, chunk_size: usize, writer: Arc<CollectingWriter>) -> ChunkStep<i32, i32> {
        ChunkStep::new(
            "numbers",
            chunk_size,
            Box::new(move || Box::new(VecReader(data.clone().into_iter())) as Box<dyn ItemReader<i32>>),
            Arc::new(EvenTimesTen),
            writer,
        )
    }

    #[actix_web::test]
    async fn test_chunk_counts() {
        let writer = Arc::new(CollectingWriter::default());
        let execution = step((1..=7).collect(), 3, writer.clone()).execute().await;

        assert_eq!(execution.status, BatchStatus::Completed);
        assert_eq!(execution.read_count, 7);
        assert_eq!(execution.filter_count, 4);
        assert_eq!(execution.write_count, 3);
        assert_eq!(execution.commit_count, 3);
        assert_eq!(*writer.chunks.lock().unwrap(), vec![vec![20], vec![40, 60]]);
    }

    #[actix_web::test]
    async fn test_fully_filtered_last_chunk_still_commits() {
        let writer = Arc::new(CollectingWriter::default());
        let execution = step(vec![2, 4, 1, 3], 2, writer.clone()).execute().await;

        assert_eq!(execution.commit_count, 2);
        assert_eq!(execution.write_count, 2);
        assert_eq!(writer.chunks.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_each_execution_gets_a_fresh_reader() {
        let writer = Arc::new(CollectingWriter::default());
        let step = step(vec![2, 4], 10, writer);

        assert_eq!(step.execute().await.read_count, 2);
        assert_eq!(step.execute().await.read_count, 2);
    }

    #[actix_web::test]
    async fn test_processor_error_fails_step() {
        let writer = Arc::new(CollectingWriter::default());
        let execution = step(vec![2, -1, 4], 10, writer.clone()).execute().await;

        assert_eq!(execution.status, BatchStatus::Failed);
        assert!(execution.failure.unwrap().contains("negative item -1"));
        assert!(writer.chunks.lock().unwrap().is_empty());
        assert!(execution.end_time.is_some());
    }

    struct CountdownTasklet(AtomicUsize);

    #[async_trait]
    impl Tasklet for CountdownTasklet {
        async fn execute(&self, contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
            contribution.write_count += 1;
            if self.0.fetch_sub(1, Ordering::SeqCst) > 1 {
                Ok(RepeatStatus::Continuable)
            } else {
                contribution.exit_description = "done".to_string();
                Ok(RepeatStatus::Finished)
            }
        }
    }

    #[actix_web::test]
    async fn test_tasklet_repeats_until_finished() {
        let step = TaskletStep::new("countdown", Arc::new(CountdownTasklet(AtomicUsize::new(3))));
        let execution = step.execute().await;

        assert_eq!(execution.status, BatchStatus::Completed);
        assert_eq!(execution.write_count, 3);
        assert_eq!(execution.exit_description, "done");
        assert_eq!(step.name(), "countdown");
    }
}
