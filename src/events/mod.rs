//! 课程事件总线
//!
//! 入课申请、申请处理、讲师邀请等动作发布事件，
//! 订阅方（当前为日志订阅者，后续可接通知推送）异步消费。

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// 课程域事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CourseEvent {
    /// 学生提交入课申请
    CourseMateRequested { course_id: i64, student_id: i64 },
    /// 讲师接受入课申请
    CourseMateAccepted { course_id: i64, student_id: i64 },
    /// 讲师拒绝入课申请
    CourseMateRejected { course_id: i64, student_id: i64 },
    /// 讲师受邀加入课程
    LecturerInvited { course_id: i64, lecturer_id: i64 },
}

/// 事件总线（broadcast 通道的薄封装）
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CourseEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// 发布事件。发布是尽力而为的：没有订阅者时丢弃并记录告警。
    pub fn publish(&self, event: CourseEvent) {
        if let Err(e) = self.sender.send(event) {
            warn!("Course event dropped, no active subscribers: {}", e);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CourseEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// 启动日志订阅者，消费全部课程事件并写入结构化日志
pub fn spawn_logging_subscriber(bus: &EventBus) {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => match &event {
                    CourseEvent::CourseMateRequested {
                        course_id,
                        student_id,
                    } => info!(course_id, student_id, "course event: mate requested"),
                    CourseEvent::CourseMateAccepted {
                        course_id,
                        student_id,
                    } => info!(course_id, student_id, "course event: mate accepted"),
                    CourseEvent::CourseMateRejected {
                        course_id,
                        student_id,
                    } => info!(course_id, student_id, "course event: mate rejected"),
                    CourseEvent::LecturerInvited {
                        course_id,
                        lecturer_id,
                    } => info!(course_id, lecturer_id, "course event: lecturer invited"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, {} events skipped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.publish(CourseEvent::CourseMateRequested {
            course_id: 1,
            student_id: 2,
        });
        let event = rx.recv().await.unwrap();
        match event {
            CourseEvent::CourseMateRequested {
                course_id,
                student_id,
            } => {
                assert_eq!(course_id, 1);
                assert_eq!(student_id, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
