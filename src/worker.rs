// src/worker.rs
//! Фоновая генерация карт
//!
//! Каждый запрос получает номер из общего счётчика и считается в отдельном потоке.
//! Актуален только последний запрос:
//! - более старые генерации прерываются на ближайшей контрольной точке
//!   ([`GenerationError::Superseded`]);
//! - если старый результат всё же успел прийти, он отбрасывается при получении.
//!
//! Потоки не разделяют изменяемого состояния: у каждого своя сетка и свои страны,
//! общий только счётчик запросов.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::config::WorldGenerationParams;
use crate::error::{GenerationError, Result};
use crate::world::{World, generate_world_with};

/// Номер запроса на генерацию
pub type RequestId = u64;

struct Completed {
    request: RequestId,
    result: Result<World>,
}

pub struct GenerationWorker {
    latest: Arc<AtomicU64>,
    sender: Sender<Completed>,
    receiver: Receiver<Completed>,
}

impl Default for GenerationWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationWorker {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            sender,
            receiver,
        }
    }

    /// Номер последнего выданного запроса (`0` — запросов ещё не было).
    #[must_use]
    pub fn latest_request(&self) -> RequestId {
        self.latest.load(Ordering::SeqCst)
    }

    /// Запускает генерацию в фоне. Все предыдущие запросы становятся устаревшими.
    pub fn request(&self, params: WorldGenerationParams) -> RequestId {
        let request = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.latest);
        let sender = self.sender.clone();

        tracing::debug!("Запрос генерации #{}", request);
        thread::spawn(move || {
            let result = generate_world_with(&params, || {
                latest.load(Ordering::SeqCst) != request
            });
            if latest.load(Ordering::SeqCst) != request {
                tracing::debug!("Результат запроса #{} устарел", request);
                return;
            }
            // Ошибка отправки означает, что воркер уже уничтожен
            let _ = sender.send(Completed { request, result });
        });
        request
    }

    fn accept(&self, completed: Completed) -> Option<Result<World>> {
        if completed.request == self.latest_request() {
            Some(completed.result)
        } else {
            tracing::debug!("Отброшен устаревший результат #{}", completed.request);
            None
        }
    }

    /// Неблокирующая проверка: результат последнего запроса, если он готов.
    pub fn try_latest(&self) -> Option<Result<World>> {
        loop {
            match self.receiver.try_recv() {
                Ok(completed) => {
                    if let Some(result) = self.accept(completed) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Ждёт результат последнего запроса не дольше `timeout`.
    pub fn wait_latest(&self, timeout: Duration) -> Option<Result<World>> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completed) => {
                    if let Some(result) = self.accept(completed) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Синхронная генерация через воркер: запрос + ожидание.
    ///
    /// Если за время ожидания через этот же воркер пришёл более новый запрос,
    /// возвращает [`GenerationError::Superseded`].
    pub fn generate_blocking(&self, params: WorldGenerationParams) -> Result<World> {
        let request = self.request(params);
        loop {
            if let Some(result) = self.wait_latest(Duration::from_millis(200)) {
                return result;
            }
            if self.latest_request() != request {
                return Err(GenerationError::Superseded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> WorldGenerationParams {
        let mut params = WorldGenerationParams {
            seed: Some(seed),
            width: 40,
            height: 32,
            country_count: 3,
            ..Default::default()
        };
        params.terrain.threshold = -0.4;
        params.islands.min_island_size = 20;
        params.growth.min_country_size = 10;
        params
    }

    #[test]
    fn only_newest_result_is_delivered() {
        let worker = GenerationWorker::new();
        worker.request(params(1));
        worker.request(params(2));
        let newest = worker.request(params(3));
        assert_eq!(newest, 3);

        let world = worker
            .wait_latest(Duration::from_secs(60))
            .expect("newest result")
            .unwrap();
        assert_eq!(world.seed, Some(3));
        // Старые результаты не приходят
        assert!(worker.try_latest().is_none());
    }

    #[test]
    fn background_result_matches_direct_generation() {
        let worker = GenerationWorker::new();
        let from_worker = worker.generate_blocking(params(5)).unwrap();
        let direct = crate::world::generate_world(&params(5)).unwrap();
        assert_eq!(from_worker, direct);
    }

    #[test]
    fn configuration_errors_cross_the_thread_boundary() {
        let worker = GenerationWorker::new();
        let bad = WorldGenerationParams {
            country_count: 0,
            ..params(1)
        };
        assert!(worker.generate_blocking(bad).unwrap_err().is_configuration());
    }
}
